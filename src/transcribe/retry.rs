//! Bounded retry for transient endpoint failures.

use super::TranscribeError;
use crate::config::RetryConfig;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Retries an operation a fixed number of times, but only for transient
/// failures. The delay is plain data so tests can set it to zero.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Run `op` until it succeeds, fails terminally, or the attempt budget
    /// is exhausted.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, TranscribeError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, TranscribeError>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    warn!(
                        "Transient failure (attempt {}/{}), retrying in {:?}: {}",
                        attempt, self.max_attempts, self.delay, err
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(config.max_attempts, config.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn transient() -> TranscribeError {
        TranscribeError::Http {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: String::new(),
        }
    }

    fn terminal() -> TranscribeError {
        TranscribeError::Http {
            status: StatusCode::UNAUTHORIZED,
            body: String::new(),
        }
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let policy = RetryPolicy::new(3, Duration::ZERO);
        let calls = AtomicU32::new(0);

        let result = policy
            .run(|| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 1 {
                        Err(transient())
                    } else {
                        Ok("done")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let policy = RetryPolicy::new(3, Duration::ZERO);
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = policy
            .run(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(transient()) }
            })
            .await;

        assert!(result.unwrap_err().is_transient());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_terminal_failure_is_not_retried() {
        let policy = RetryPolicy::new(3, Duration::ZERO);
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = policy
            .run(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(terminal()) }
            })
            .await;

        assert!(!result.unwrap_err().is_transient());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_single_attempt_policy() {
        let policy = RetryPolicy::new(1, Duration::ZERO);
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = policy
            .run(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(transient()) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_zero_attempts_clamped_to_one() {
        let policy = RetryPolicy::new(0, Duration::ZERO);
        assert_eq!(policy.max_attempts, 1);
    }
}
