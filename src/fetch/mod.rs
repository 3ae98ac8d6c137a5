//! Data acquisition from the simulation API.
//!
//! The UI loop never blocks on the network: a [`Fetcher`] starts at most one
//! request per submission and is polled each tick for the outcome. The
//! production implementation ([`HttpFetcher`]) runs the request on a tokio
//! runtime; tests substitute a stub behind the same trait.

mod envelope;
mod http;

pub use envelope::{parse_envelope, FetchError, RawPoint};
pub use http::{fetch_simulation, HttpFetcher};

use chrono::NaiveDate;

/// Parameters of one simulation query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationRequest {
    pub city: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Result of a settled fetch.
pub type FetchOutcome = Result<Vec<RawPoint>, FetchError>;

/// Trait for issuing simulation queries from the UI loop.
///
/// At most one request may be outstanding; `start` while `in_flight` is an
/// error, and the app guards against it by disabling submission.
pub trait Fetcher: Send {
    /// Begin fetching; the outcome arrives via [`Fetcher::poll`].
    fn start(&mut self, request: SimulationRequest) -> anyhow::Result<()>;

    /// Poll for a settled outcome without blocking.
    fn poll(&mut self) -> Option<FetchOutcome>;

    /// Whether a request is currently outstanding.
    fn in_flight(&self) -> bool;

    /// Human-readable description of the endpoint, for the status bar.
    fn description(&self) -> &str;
}
