//! Remote transcription: client, retry policy and directory runner.

pub mod client;
pub mod retry;
pub mod runner;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranscribeError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TranscribeError {
    /// Whether the failure is expected to resolve itself on a later attempt.
    ///
    /// Only 503 from the endpoint qualifies; everything else is terminal
    /// for the current file.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            TranscribeError::Http {
                status: StatusCode::SERVICE_UNAVAILABLE,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_503_is_transient() {
        let err = TranscribeError::Http {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: String::new(),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn test_other_statuses_are_terminal() {
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::UNAUTHORIZED,
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            let err = TranscribeError::Http {
                status,
                body: String::new(),
            };
            assert!(!err.is_transient(), "{status} must not be retried");
        }
    }

    #[test]
    fn test_io_errors_are_terminal() {
        let err = TranscribeError::Io(std::io::Error::other("disk"));
        assert!(!err.is_transient());
    }
}
