//! Provisioning API trait definitions

use crate::error::Result;
use crate::request::DeploymentRequest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Remote stack API abstraction
///
/// Backends (the AWS CloudFormation client, test fakes) implement this trait
/// to give the deployer, waiter, and output reader a uniform seam. All calls
/// are issued sequentially; implementations are not required to support
/// concurrent use against the same stack.
#[async_trait]
pub trait StackApi: Send + Sync {
    /// Current raw stack status, or `None` when the stack does not exist.
    async fn stack_status(&self, stack: &str) -> Result<Option<String>>;

    /// Create the stack from the request's template, capabilities,
    /// parameters, and tags.
    async fn create_stack(&self, request: &DeploymentRequest) -> Result<()>;

    /// Delete the stack. Deletion proceeds asynchronously on the remote side.
    async fn delete_stack(&self, stack: &str) -> Result<()>;

    /// Create a change set previewing an update of the stack.
    async fn create_change_set(&self, request: &DeploymentRequest, name: &str) -> Result<()>;

    /// Current build state of a change set.
    async fn change_set_state(&self, stack: &str, name: &str) -> Result<ChangeSetState>;

    /// Execute a built change set.
    async fn execute_change_set(&self, stack: &str, name: &str) -> Result<()>;

    /// Discard a change set without executing it.
    async fn delete_change_set(&self, stack: &str, name: &str) -> Result<()>;

    /// Outputs of the stack.
    async fn stack_outputs(&self, stack: &str) -> Result<Vec<StackOutput>>;
}

/// Build state of a change set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeSetState {
    /// Still being computed
    Building,
    /// Built and ready to execute
    Ready,
    /// Built, but the template produced no changes
    NoChanges,
    /// Creation failed for a reason other than an empty diff
    Failed(String),
}

/// A single stack output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackOutput {
    pub key: String,
    pub value: String,
}

impl StackOutput {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Remote key-value parameter store abstraction
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Parameter value, or `None` when the store has no such name.
    async fn get_parameter(&self, name: &str) -> Result<Option<String>>;
}
