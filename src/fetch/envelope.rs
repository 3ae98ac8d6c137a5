//! Wire contract for the simulation API.
//!
//! The endpoint answers `{"status": "success", "data": [...]}` on success.
//! Anything else, including an HTTP 200 carrying `{"status": "error", ...}`,
//! is an application-level failure; error messages carry the raw body or
//! serialized payload so the user can see exactly what came back.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One reading exactly as received from the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Internal Temperature (°C)")]
    pub internal_temp_c: f64,
    #[serde(rename = "External Temperature (°C)")]
    pub external_temp_c: f64,
}

/// Failure modes of a single fetch. All are terminal for the submission:
/// there is no retry, the user resubmits.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),
    /// Non-2xx response.
    #[error("API error: {status} - {message}")]
    Http { status: u16, message: String },
    /// The body was not JSON at all.
    #[error("failed to parse response as JSON: {body}")]
    InvalidJson { body: String },
    /// The API reported an error of its own (e.g. unknown city).
    #[error("API error: {message}")]
    Api { message: String },
    /// JSON, but not the `{status: "success", data: [...]}` contract.
    #[error("invalid response format: {payload}")]
    Contract { payload: String },
}

/// Validate a response against the simulation API contract.
///
/// Pure over the HTTP status and raw body text, so the taxonomy is unit
/// testable without a server.
pub fn parse_envelope(status: StatusCode, body: &str) -> Result<Vec<RawPoint>, FetchError> {
    let payload: serde_json::Value =
        serde_json::from_str(body).map_err(|_| FetchError::InvalidJson {
            body: body.to_string(),
        })?;

    if !status.is_success() {
        let message = payload
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or(body)
            .to_string();
        return Err(FetchError::Http {
            status: status.as_u16(),
            message,
        });
    }

    match payload.get("status").and_then(|s| s.as_str()) {
        Some("success") => {
            let data = payload
                .get("data")
                .filter(|d| d.is_array())
                .cloned()
                .ok_or_else(|| FetchError::Contract {
                    payload: payload.to_string(),
                })?;
            serde_json::from_value(data).map_err(|_| FetchError::Contract {
                payload: payload.to_string(),
            })
        }
        _ => match payload.get("message").and_then(|m| m.as_str()) {
            Some(message) => Err(FetchError::Api {
                message: message.to_string(),
            }),
            None => Err(FetchError::Contract {
                payload: payload.to_string(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_success_envelope() {
        let body = r#"{
            "status": "success",
            "data": [
                {
                    "Timestamp": "2024-01-01 00:00:00",
                    "Internal Temperature (°C)": 10.0,
                    "External Temperature (°C)": 8.0
                }
            ]
        }"#;

        let points = parse_envelope(StatusCode::OK, body).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].timestamp, "2024-01-01 00:00:00");
        assert_eq!(points[0].internal_temp_c, 10.0);
        assert_eq!(points[0].external_temp_c, 8.0);
    }

    #[test]
    fn http_200_with_error_status_surfaces_the_message() {
        let body = r#"{"status": "error", "message": "city not found"}"#;
        let err = parse_envelope(StatusCode::OK, body).unwrap_err();

        assert!(matches!(err, FetchError::Api { .. }));
        assert!(err.to_string().contains("city not found"));
    }

    #[test]
    fn non_json_body_is_surfaced_verbatim() {
        let err = parse_envelope(StatusCode::OK, "<html>gateway timeout</html>").unwrap_err();

        assert!(matches!(err, FetchError::InvalidJson { .. }));
        assert!(err.to_string().contains("<html>gateway timeout</html>"));
    }

    #[test]
    fn wrong_shape_is_a_contract_error_with_payload() {
        let err = parse_envelope(StatusCode::OK, r#"{"status": "success", "data": 42}"#)
            .unwrap_err();

        assert!(matches!(err, FetchError::Contract { .. }));
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn missing_status_field_is_a_contract_error() {
        let err = parse_envelope(StatusCode::OK, r#"{"data": []}"#).unwrap_err();
        assert!(matches!(err, FetchError::Contract { .. }));
    }

    #[test]
    fn non_2xx_carries_status_and_message() {
        let body = r#"{"message": "internal failure"}"#;
        let err = parse_envelope(StatusCode::INTERNAL_SERVER_ERROR, body).unwrap_err();

        assert!(matches!(err, FetchError::Http { status: 500, .. }));
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("internal failure"));
    }

    #[test]
    fn empty_data_array_is_valid() {
        let points = parse_envelope(StatusCode::OK, r#"{"status": "success", "data": []}"#).unwrap();
        assert!(points.is_empty());
    }
}
