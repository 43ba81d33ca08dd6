use anyhow::{anyhow, Result};
use std::future::Future;
use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;
use tokio_retry::Retry;
use tracing::debug;

/// Runs fallible async operations with a per-attempt timeout and
/// exponential backoff between retries. After the retry budget is
/// spent, the last failure propagates to the caller unchanged.
#[derive(Debug, Clone)]
pub struct RetryExecutor {
    timeout: Duration,
    max_retries: usize,
    backoff_base: Duration,
    backoff_cap: Duration,
}

impl Default for RetryExecutor {
    fn default() -> Self {
        Self::new(Duration::from_secs(30), 3)
    }
}

impl RetryExecutor {
    pub fn new(timeout: Duration, max_retries: usize) -> Self {
        Self {
            timeout,
            max_retries,
            backoff_base: Duration::from_millis(100),
            backoff_cap: Duration::from_secs(5),
        }
    }

    /// Replace the backoff schedule. `base` seeds the exponential
    /// series; `cap` bounds any single delay.
    pub fn with_backoff(mut self, base: Duration, cap: Duration) -> Self {
        self.backoff_base = base;
        self.backoff_cap = cap;
        self
    }

    /// Run `operation`, retrying on error or timeout. The operation is
    /// invoked once plus up to `max_retries` more times.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let strategy = ExponentialBackoff::from_millis(self.backoff_base.as_millis() as u64)
            .max_delay(self.backoff_cap)
            .take(self.max_retries);

        let timeout = self.timeout;
        let mut attempt = 0usize;

        Retry::spawn(strategy, || {
            attempt += 1;
            let current = attempt;
            let fut = operation();
            async move {
                match tokio::time::timeout(timeout, fut).await {
                    Ok(result) => result,
                    Err(_) => {
                        debug!(attempt = current, ?timeout, "attempt timed out");
                        Err(anyhow!(
                            "Operation timed out after {}ms",
                            timeout.as_millis()
                        ))
                    }
                }
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn fast_executor(timeout: Duration, max_retries: usize) -> RetryExecutor {
        RetryExecutor::new(timeout, max_retries)
            .with_backoff(Duration::from_millis(1), Duration::from_millis(5))
    }

    #[tokio::test]
    async fn test_succeeds_first_try() {
        let executor = fast_executor(Duration::from_secs(1), 3);
        let result: i32 = executor.run(|| async { Ok(7) }).await.unwrap();
        assert_eq!(result, 7);
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let executor = fast_executor(Duration::from_secs(1), 3);
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let result: &str = executor
            .run(|| {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                        anyhow::bail!("transient failure");
                    }
                    Ok("recovered")
                }
            })
            .await
            .unwrap();

        assert_eq!(result, "recovered");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhausted_retries_return_last_error() {
        let executor = fast_executor(Duration::from_secs(1), 2);
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let err = executor
            .run(|| {
                let counter = counter.clone();
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst);
                    Err::<(), _>(anyhow!("failure {}", n))
                }
            })
            .await
            .unwrap_err();

        // Initial attempt plus two retries; last error wins
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(err.to_string(), "failure 2");
    }

    #[tokio::test]
    async fn test_timeout_is_retried_then_reported() {
        let executor = fast_executor(Duration::from_millis(10), 1);

        let err = executor
            .run(|| async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                Ok(())
            })
            .await
            .unwrap_err();

        assert!(err.to_string().contains("timed out"));
    }
}
