//! Stack status polling
//!
//! Polls a stack's status at a fixed interval until it leaves the
//! in-progress category or a timeout elapses. Elapsed time is measured with
//! a monotonic clock so wall-clock adjustments cannot cut a wait short or
//! extend it.

use crate::api::StackApi;
use crate::error::Result;
use crate::status::StatusCategory;
use std::time::Duration;
use tokio::time::{Instant, sleep};

/// Polling configuration for stack waits
#[derive(Debug, Clone)]
pub struct WaitConfig {
    /// Give up after this much elapsed time
    pub timeout: Duration,

    /// Delay between status polls
    pub interval: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(600),
            interval: Duration::from_secs(10),
        }
    }
}

/// Terminal result of waiting on a stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome {
    /// Stack settled in a completed status
    Completed { status: String },
    /// Stack settled in a failed or rolled-back status
    Failed { status: String },
    /// Stack does not exist (deleted, or never created)
    DoesNotExist,
    /// Stack was still in progress when the timeout elapsed
    TimedOut { status: String },
}

/// Wait for a stack to leave the in-progress category.
///
/// A timeout is reported as [`WaitOutcome::TimedOut`], never as an error;
/// only remote API failures produce `Err`.
pub async fn wait_for_stack(
    api: &dyn StackApi,
    stack: &str,
    config: &WaitConfig,
) -> Result<WaitOutcome> {
    let start = Instant::now();

    let mut status = match api.stack_status(stack).await? {
        Some(status) => status,
        None => {
            tracing::info!("Stack {} does not exist", stack);
            return Ok(WaitOutcome::DoesNotExist);
        }
    };

    while StatusCategory::classify(&status) == StatusCategory::InProgress
        && start.elapsed() < config.timeout
    {
        tracing::debug!("Stack {} is {}, polling again", stack, status);
        sleep(config.interval).await;
        status = match api.stack_status(stack).await? {
            Some(status) => status,
            None => return Ok(WaitOutcome::DoesNotExist),
        };
    }

    let outcome = match StatusCategory::classify(&status) {
        StatusCategory::InProgress => {
            tracing::warn!(
                "Timed out after {:?} waiting for stack {} (status: {})",
                config.timeout,
                stack,
                status
            );
            WaitOutcome::TimedOut { status }
        }
        StatusCategory::Completed => WaitOutcome::Completed { status },
        // A rolled-back or otherwise unusable stack means the operation we
        // were waiting on did not succeed.
        StatusCategory::Failed
        | StatusCategory::Rollback
        | StatusCategory::UpdateImpossible => WaitOutcome::Failed { status },
        // classify never returns the describe sentinel
        StatusCategory::DoesNotExist => unreachable!(),
    };

    tracing::info!("Stack {} settled: {:?}", stack, outcome);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeStackApi;

    #[tokio::test(start_paused = true)]
    async fn test_wait_returns_completed() {
        let api = FakeStackApi::new()
            .with_statuses(vec![
                Some("UPDATE_IN_PROGRESS"),
                Some("UPDATE_IN_PROGRESS"),
                Some("UPDATE_COMPLETE"),
            ]);

        let outcome = wait_for_stack(&api, "web", &WaitConfig::default())
            .await
            .unwrap();
        assert_eq!(
            outcome,
            WaitOutcome::Completed {
                status: "UPDATE_COMPLETE".to_string()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_returns_failed() {
        let api = FakeStackApi::new().with_statuses(vec![
            Some("CREATE_IN_PROGRESS"),
            Some("ROLLBACK_COMPLETE"),
        ]);

        let outcome = wait_for_stack(&api, "web", &WaitConfig::default())
            .await
            .unwrap();
        assert_eq!(
            outcome,
            WaitOutcome::Failed {
                status: "ROLLBACK_COMPLETE".to_string()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_reports_missing_stack() {
        let api = FakeStackApi::new().with_statuses(vec![None]);

        let outcome = wait_for_stack(&api, "web", &WaitConfig::default())
            .await
            .unwrap();
        assert_eq!(outcome, WaitOutcome::DoesNotExist);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_times_out_after_roughly_three_polls() {
        // Stays in progress forever; with a 30s timeout and 10s interval the
        // loop should poll ~3 times and then report a timeout as a value.
        let api = FakeStackApi::new().with_statuses(vec![Some("UPDATE_IN_PROGRESS")]);

        let config = WaitConfig {
            timeout: Duration::from_secs(30),
            interval: Duration::from_secs(10),
        };
        let start = tokio::time::Instant::now();
        let outcome = wait_for_stack(&api, "web", &config).await.unwrap();

        assert_eq!(
            outcome,
            WaitOutcome::TimedOut {
                status: "UPDATE_IN_PROGRESS".to_string()
            }
        );
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(30));
        assert!(elapsed < Duration::from_secs(41));
        // Initial describe plus one per poll tick.
        assert_eq!(api.describe_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_detects_deletion_mid_poll() {
        let api = FakeStackApi::new()
            .with_statuses(vec![Some("DELETE_IN_PROGRESS"), None]);

        let outcome = wait_for_stack(&api, "web", &WaitConfig::default())
            .await
            .unwrap();
        assert_eq!(outcome, WaitOutcome::DoesNotExist);
    }
}
