//! Background task dispatcher
//!
//! Runs best-effort bookkeeping off the request path. Transient
//! infrastructure failures retry with exponential backoff; anything else
//! fails the task immediately. Exhausted tasks are logged and counted for
//! operational visibility but never surface to a user.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::services::ServiceResult;

/// Retry policy for background tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Backoff before the second attempt; doubles each retry
    pub base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    /// Delay before the retry following failed attempt `attempt` (1-based)
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_backoff.saturating_mul(1 << exponent)
    }
}

/// How a dispatched task ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Completed { attempts: u32 },
    Failed { attempts: u32 },
}

impl TaskOutcome {
    /// Check if the task completed successfully
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Dispatches fire-and-forget tasks with retry
#[derive(Clone, Default)]
pub struct TaskDispatcher {
    failed_tasks: Arc<AtomicU64>,
}

impl TaskDispatcher {
    /// Create a new dispatcher
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks that exhausted their retries or failed permanently
    #[must_use]
    pub fn failed_task_count(&self) -> u64 {
        self.failed_tasks.load(Ordering::Relaxed)
    }

    /// Spawn a task. `op` is invoked once per attempt; only retryable
    /// (infrastructure) errors are retried, up to the policy's attempt
    /// limit.
    pub fn spawn<F, Fut, T>(
        &self,
        name: &'static str,
        policy: RetryPolicy,
        op: F,
    ) -> JoinHandle<TaskOutcome>
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ServiceResult<T>> + Send,
        T: Send + 'static,
    {
        let failed_tasks = self.failed_tasks.clone();

        tokio::spawn(async move {
            let mut attempt: u32 = 1;
            loop {
                match op().await {
                    Ok(_) => {
                        debug!(task = name, attempts = attempt, "Background task completed");
                        return TaskOutcome::Completed { attempts: attempt };
                    }
                    Err(e) if e.is_retryable() && attempt < policy.max_attempts => {
                        warn!(
                            task = name,
                            attempt = attempt,
                            error = %e,
                            "Background task failed, retrying"
                        );
                        tokio::time::sleep(policy.delay_for_attempt(attempt)).await;
                        attempt += 1;
                    }
                    Err(e) => {
                        failed_tasks.fetch_add(1, Ordering::Relaxed);
                        error!(
                            task = name,
                            attempts = attempt,
                            error = %e,
                            code = e.error_code(),
                            "Background task abandoned"
                        );
                        return TaskOutcome::Failed { attempts: attempt };
                    }
                }
            }
        })
    }
}
