//! Stack status classification
//!
//! CloudFormation reports stack state as an enumerated status string
//! (`CREATE_COMPLETE`, `ROLLBACK_IN_PROGRESS`, ...). This module maps those
//! strings onto the small set of categories the deployment logic branches on.
//!
//! The upstream status tables overlap (`ROLLBACK_COMPLETE` is documented as
//! both a terminal success and a failure depending on the revision), so
//! membership is resolved in a fixed priority order:
//! failed > rollback > in-progress > completed > update-impossible.

use serde::{Deserialize, Serialize};

/// Statuses reported while a stack operation is still running.
pub const IN_PROGRESS_STATUSES: &[&str] = &[
    "CREATE_IN_PROGRESS",
    "ROLLBACK_IN_PROGRESS",
    "DELETE_IN_PROGRESS",
    "UPDATE_IN_PROGRESS",
    "UPDATE_COMPLETE_CLEANUP_IN_PROGRESS",
    "UPDATE_ROLLBACK_IN_PROGRESS",
    "UPDATE_ROLLBACK_COMPLETE_CLEANUP_IN_PROGRESS",
    "REVIEW_IN_PROGRESS",
    "IMPORT_IN_PROGRESS",
    "IMPORT_ROLLBACK_IN_PROGRESS",
];

/// Terminal statuses after a successful operation.
pub const COMPLETED_STATUSES: &[&str] = &[
    "CREATE_COMPLETE",
    "DELETE_COMPLETE",
    "UPDATE_COMPLETE",
    "IMPORT_COMPLETE",
];

/// Terminal statuses after a failed operation.
///
/// `ROLLBACK_COMPLETE` is listed here on purpose: a stack that rolled back
/// its initial create holds no resources and can only be deleted, so the
/// deployer must treat it as a failure rather than a completed state.
pub const FAILED_STATUSES: &[&str] = &[
    "CREATE_FAILED",
    "ROLLBACK_FAILED",
    "ROLLBACK_COMPLETE",
    "DELETE_FAILED",
    "UPDATE_FAILED",
    "UPDATE_ROLLBACK_FAILED",
    "IMPORT_FAILED",
    "IMPORT_ROLLBACK_FAILED",
];

/// Terminal statuses after an operation was rolled back.
///
/// The stack is stable and still updatable in these states, unlike the
/// entries in [`FAILED_STATUSES`].
pub const ROLLBACK_STATUSES: &[&str] = &[
    "UPDATE_ROLLBACK_COMPLETE",
    "IMPORT_ROLLBACK_COMPLETE",
];

/// Statuses in which an update call would be rejected outright.
///
/// Consulted last in the classification priority, so everything currently
/// listed here is shadowed by [`FAILED_STATUSES`]; the table exists for
/// statuses that are un-updatable without being failures.
pub const UPDATE_IMPOSSIBLE_STATUSES: &[&str] = &["ROLLBACK_COMPLETE"];

/// Semantic category of a stack status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    /// An operation is still running
    InProgress,
    /// Last operation finished successfully
    Completed,
    /// Last operation failed; the stack must be deleted and recreated
    Failed,
    /// Last operation was rolled back; the stack is stable and updatable
    Rollback,
    /// The stack cannot be updated in its current state
    UpdateImpossible,
    /// The stack does not exist (describe sentinel, never a status string)
    DoesNotExist,
}

/// Membership tables in classification priority order. A status appearing
/// in more than one table resolves to the earliest match.
const CLASSIFICATION: &[(&[&str], StatusCategory)] = &[
    (FAILED_STATUSES, StatusCategory::Failed),
    (ROLLBACK_STATUSES, StatusCategory::Rollback),
    (IN_PROGRESS_STATUSES, StatusCategory::InProgress),
    (COMPLETED_STATUSES, StatusCategory::Completed),
    (UPDATE_IMPOSSIBLE_STATUSES, StatusCategory::UpdateImpossible),
];

impl StatusCategory {
    /// Classify a raw status string.
    ///
    /// Tables are checked in priority order so statuses appearing in more
    /// than one upstream revision resolve deterministically. Strings outside
    /// every table classify as [`StatusCategory::UpdateImpossible`].
    pub fn classify(status: &str) -> Self {
        CLASSIFICATION
            .iter()
            .find(|(table, _)| table.contains(&status))
            .map(|&(_, category)| category)
            .unwrap_or(StatusCategory::UpdateImpossible)
    }

    /// Whether the stack has settled (no operation running).
    pub fn is_terminal(self) -> bool {
        self != StatusCategory::InProgress
    }
}

impl std::fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusCategory::InProgress => write!(f, "in-progress"),
            StatusCategory::Completed => write!(f, "completed"),
            StatusCategory::Failed => write!(f, "failed"),
            StatusCategory::Rollback => write!(f, "rollback"),
            StatusCategory::UpdateImpossible => write!(f, "update-impossible"),
            StatusCategory::DoesNotExist => write!(f, "does-not-exist"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_progress_statuses() {
        for status in IN_PROGRESS_STATUSES {
            assert_eq!(StatusCategory::classify(status), StatusCategory::InProgress);
        }
    }

    #[test]
    fn test_completed_statuses() {
        assert_eq!(
            StatusCategory::classify("CREATE_COMPLETE"),
            StatusCategory::Completed
        );
        assert_eq!(
            StatusCategory::classify("DELETE_COMPLETE"),
            StatusCategory::Completed
        );
        assert_eq!(
            StatusCategory::classify("UPDATE_COMPLETE"),
            StatusCategory::Completed
        );
    }

    #[test]
    fn test_failed_statuses() {
        // Every table entry, IMPORT_FAILED included, classifies as Failed.
        for status in FAILED_STATUSES {
            assert_eq!(
                StatusCategory::classify(status),
                StatusCategory::Failed,
                "{status}"
            );
        }
        assert_eq!(
            StatusCategory::classify("IMPORT_FAILED"),
            StatusCategory::Failed
        );
    }

    #[test]
    fn test_rollback_complete_is_failed() {
        // Appears in completed, failed, and rollback tables across upstream
        // revisions; the priority order resolves it to Failed.
        assert_eq!(
            StatusCategory::classify("ROLLBACK_COMPLETE"),
            StatusCategory::Failed
        );
    }

    #[test]
    fn test_update_rollback_complete_is_rollback() {
        assert_eq!(
            StatusCategory::classify("UPDATE_ROLLBACK_COMPLETE"),
            StatusCategory::Rollback
        );
        assert_eq!(
            StatusCategory::classify("IMPORT_ROLLBACK_COMPLETE"),
            StatusCategory::Rollback
        );
    }

    #[test]
    fn test_unknown_status_is_update_impossible() {
        assert_eq!(
            StatusCategory::classify("SOME_FUTURE_STATUS"),
            StatusCategory::UpdateImpossible
        );
    }

    #[test]
    fn test_terminal() {
        assert!(!StatusCategory::InProgress.is_terminal());
        assert!(StatusCategory::Completed.is_terminal());
        assert!(StatusCategory::Failed.is_terminal());
        assert!(StatusCategory::DoesNotExist.is_terminal());
    }
}
