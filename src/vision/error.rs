// src/vision/error.rs
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("API key is not a valid header value")]
    InvalidKey,

    #[error("Image Analysis request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Image Analysis API error ({status}): {code}: {message}")]
    Service {
        status: StatusCode,
        code: String,
        message: String,
    },

    #[error("could not decode Image Analysis response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl VisionError {
    /// Build a `Service` error from a non-success status and its raw body.
    /// Falls back to the body text when it is not the service's error envelope.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => VisionError::Service {
                status,
                code: envelope.error.code,
                message: envelope.error.message,
            },
            Err(_) => VisionError::Service {
                status,
                code: status
                    .canonical_reason()
                    .unwrap_or("Unknown")
                    .to_string(),
                message: body.trim().to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_service_error_envelope() {
        let body = r#"{"error":{"code":"401","message":"Access denied due to invalid subscription key."}}"#;
        match VisionError::from_status(StatusCode::UNAUTHORIZED, body) {
            VisionError::Service { status, code, message } => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(code, "401");
                assert!(message.starts_with("Access denied"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn plain_body_keeps_text() {
        let err = VisionError::from_status(StatusCode::TOO_MANY_REQUESTS, "quota exceeded\n");
        assert_eq!(
            err.to_string(),
            "Image Analysis API error (429 Too Many Requests): Too Many Requests: quota exceeded"
        );
    }
}
