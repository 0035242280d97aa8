//! Stack deployment error types

use thiserror::Error;

/// Stack deployment errors
#[derive(Error, Debug)]
pub enum StackError {
    #[error("Stack operation already in progress: {0}")]
    OperationInProgress(String),

    #[error("Stack {stack} is not in a valid state: {status}")]
    InvalidState { stack: String, status: String },

    #[error("Output not found: {0}")]
    OutputNotFound(String),

    #[error("Parameter not found: {0}")]
    ParameterNotFound(String),

    #[error("Request has no usable template source")]
    MissingTemplateSource,

    #[error("Failed to delete stack {0}, cannot continue")]
    DeleteIncomplete(String),

    #[error("Stack operation failed: {stack} ended in {status}")]
    OperationFailed { stack: String, status: String },

    #[error("Change set failed: {0}")]
    ChangeSetFailed(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StackError>;
