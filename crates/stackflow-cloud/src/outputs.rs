//! Stack output lookup

use crate::api::StackApi;
use crate::error::{Result, StackError};
use crate::status::StatusCategory;

/// Fetch a named output from a completed stack.
///
/// Single synchronous describe, no retry. The stack must classify as
/// completed; anything else (including a missing stack) is an invalid-state
/// error, and an absent key is an output-not-found error.
pub async fn get_output(api: &dyn StackApi, stack: &str, key: &str) -> Result<String> {
    let status = api
        .stack_status(stack)
        .await?
        .ok_or_else(|| StackError::InvalidState {
            stack: stack.to_string(),
            status: "DOES_NOT_EXIST".to_string(),
        })?;

    if StatusCategory::classify(&status) != StatusCategory::Completed {
        return Err(StackError::InvalidState {
            stack: stack.to_string(),
            status,
        });
    }

    let outputs = api.stack_outputs(stack).await?;
    outputs
        .into_iter()
        .find(|output| output.key == key)
        .map(|output| output.value)
        .ok_or_else(|| StackError::OutputNotFound(key.to_string()))
}
