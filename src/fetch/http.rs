//! HTTP fetcher backed by reqwest on a tokio runtime.
//!
//! One GET per submission; the outcome crosses back to the UI thread over a
//! oneshot channel polled with `try_recv`, so the render loop never blocks.
//! No retry and no explicit timeout: a submission relies on the platform
//! defaults and is terminal on failure.

use anyhow::bail;
use reqwest::header::ACCEPT;
use reqwest::Client;
use tokio::runtime::Handle;
use tokio::sync::oneshot;

use super::envelope::{parse_envelope, FetchError};
use super::{FetchOutcome, Fetcher, SimulationRequest};

/// Fetcher issuing real requests against a configured base URL.
#[derive(Debug)]
pub struct HttpFetcher {
    client: Client,
    handle: Handle,
    base_url: String,
    description: String,
    pending: Option<oneshot::Receiver<FetchOutcome>>,
}

impl HttpFetcher {
    /// Create a fetcher for the given API base URL.
    pub fn new(handle: Handle, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let description = format!("api: {}/simulate", base_url);
        Self {
            client: Client::new(),
            handle,
            base_url,
            description,
            pending: None,
        }
    }

    /// The simulate endpoint URL (without query parameters).
    pub fn endpoint(&self) -> String {
        format!("{}/simulate", self.base_url)
    }
}

impl Fetcher for HttpFetcher {
    fn start(&mut self, request: SimulationRequest) -> anyhow::Result<()> {
        if self.in_flight() {
            bail!("a fetch is already in flight");
        }

        let (tx, rx) = oneshot::channel();
        let client = self.client.clone();
        let url = self.endpoint();

        self.handle.spawn(async move {
            // The receiver may be gone if the app shut down mid-flight.
            let _ = tx.send(fetch_simulation(&client, &url, &request).await);
        });

        self.pending = Some(rx);
        Ok(())
    }

    fn poll(&mut self) -> Option<FetchOutcome> {
        let rx = self.pending.as_mut()?;
        match rx.try_recv() {
            Ok(outcome) => {
                self.pending = None;
                Some(outcome)
            }
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => {
                self.pending = None;
                Some(Err(FetchError::Transport(
                    "fetch task dropped without a result".to_string(),
                )))
            }
        }
    }

    fn in_flight(&self) -> bool {
        self.pending.is_some()
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Issue the GET and validate the envelope.
pub async fn fetch_simulation(
    client: &Client,
    url: &str,
    request: &SimulationRequest,
) -> FetchOutcome {
    let response = client
        .get(url)
        .query(&[
            ("city", request.city.as_str()),
            ("start_date", &request.start_date.to_string()),
            ("end_date", &request.end_date.to_string()),
        ])
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    parse_envelope(status, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalizes_trailing_slash() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let fetcher = HttpFetcher::new(runtime.handle().clone(), "http://localhost:8000/");
        assert_eq!(fetcher.endpoint(), "http://localhost:8000/simulate");
        assert_eq!(fetcher.description(), "api: http://localhost:8000/simulate");
    }

    #[test]
    fn rejects_overlapping_requests() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut fetcher = HttpFetcher::new(runtime.handle().clone(), "http://localhost:8000");
        let request = SimulationRequest {
            city: "Tokyo".to_string(),
            start_date: "2024-01-01".parse().unwrap(),
            end_date: "2024-01-02".parse().unwrap(),
        };

        fetcher.start(request.clone()).unwrap();
        assert!(fetcher.in_flight());
        assert!(fetcher.start(request).is_err());
    }
}
