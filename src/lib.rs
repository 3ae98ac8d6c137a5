// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # tempwatch
//!
//! A TUI and library for exploring simulated city temperature data.
//!
//! This crate queries a temperature simulation API for a city and date
//! range, then displays the readings in an interactive terminal UI: a
//! zoomable line chart of both temperature channels, per-channel summary
//! statistics, and a raw data table.
//!
//! ## Architecture
//!
//! The crate is organized into five main modules:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(processing)   │(rendering)   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ fetch   │◀── HttpFetcher (simulation API)               │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, the query form, view navigation, and
//!   user interaction logic
//! - **[`fetch`]**: Data source abstraction ([`Fetcher`] trait) with an HTTP
//!   implementation that polls non-blockingly from the render loop
//! - **[`data`]**: Data processing - formats raw readings into a sorted
//!   series, computes summary statistics, and drives the zoom window
//! - **[`ui`]**: Terminal rendering using ratatui - chart, statistics cards,
//!   raw data table, and theme support
//! - **[`config`]**: Layered settings (defaults, file, environment, CLI)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Interactive dashboard against a local simulation API
//! tempwatch --base-url http://localhost:8000
//!
//! # Prefill the query and analyze immediately
//! tempwatch --city Berlin --start-date 2024-01-01 --end-date 2024-01-07
//!
//! # Non-interactive: fetch, compute, export to JSON
//! tempwatch --city Berlin --start-date 2024-01-01 --end-date 2024-01-07 \
//!     --export report.json
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use tempwatch::{App, HttpFetcher, SystemClock};
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let fetcher = Box::new(HttpFetcher::new(rt.handle().clone(), "http://localhost:8000"));
//! let app = App::new(fetcher, Box::new(SystemClock));
//! ```

pub mod app;
pub mod clock;
pub mod config;
pub mod data;
pub mod events;
pub mod fetch;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, FormField, Preset, View};
pub use clock::{Clock, SystemClock};
pub use config::Settings;
pub use data::{
    format_series, ChannelStats, FormattedPoint, SeriesData, Statistics, ZoomController,
    ZoomPhase, ZoomRange,
};
pub use fetch::{FetchError, Fetcher, HttpFetcher, RawPoint, SimulationRequest};
pub use ui::Theme;
