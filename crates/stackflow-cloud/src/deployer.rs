//! Stack deployment decision tree
//!
//! [`StackDeployer::deploy`] resolves the stack's current status, classifies
//! it, and issues exactly one of create, update-via-change-set, or
//! delete-then-recreate. A stack with an operation already running fails
//! fast; the caller decides when to retry.

use crate::api::{ChangeSetState, StackApi};
use crate::error::{Result, StackError};
use crate::request::DeploymentRequest;
use crate::status::StatusCategory;
use crate::waiter::{WaitConfig, WaitOutcome, wait_for_stack};
use serde::{Deserialize, Serialize};
use tokio::time::{Instant, sleep};

/// What a deploy call ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Deployed {
    /// Stack did not exist; it was created
    Created,
    /// Stack existed; a change set was executed
    Updated,
    /// Stack existed; the change set was empty and was discarded
    NoChanges,
    /// Stack was in a failed state; it was deleted and created again
    Recreated,
}

impl std::fmt::Display for Deployed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Deployed::Created => write!(f, "created"),
            Deployed::Updated => write!(f, "updated"),
            Deployed::NoChanges => write!(f, "no changes"),
            Deployed::Recreated => write!(f, "recreated"),
        }
    }
}

/// Deploys one stack per call against a [`StackApi`] backend
pub struct StackDeployer<'a> {
    api: &'a dyn StackApi,
    wait: WaitConfig,
}

impl<'a> StackDeployer<'a> {
    pub fn new(api: &'a dyn StackApi) -> Self {
        Self {
            api,
            wait: WaitConfig::default(),
        }
    }

    /// Override the polling configuration used for the synchronous waits
    /// inside a deploy (post-delete, post-execute).
    pub fn with_wait_config(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    /// Deploy the requested stack.
    ///
    /// At most one of create / update / delete-then-create is performed per
    /// call. Remote state is the only state: nothing is persisted locally.
    pub async fn deploy(&self, request: &DeploymentRequest) -> Result<Deployed> {
        request.validate()?;

        let status = self.api.stack_status(&request.stack_name).await?;
        let category = match &status {
            Some(status) => StatusCategory::classify(status),
            None => StatusCategory::DoesNotExist,
        };
        tracing::info!(
            "Stack {} status: {} ({})",
            request.stack_name,
            status.as_deref().unwrap_or("DOES_NOT_EXIST"),
            category
        );

        match category {
            StatusCategory::DoesNotExist => {
                tracing::info!("Creating stack {}", request.stack_name);
                self.api.create_stack(request).await?;
                Ok(Deployed::Created)
            }
            StatusCategory::InProgress => {
                Err(StackError::OperationInProgress(request.stack_name.clone()))
            }
            StatusCategory::Failed | StatusCategory::UpdateImpossible => {
                self.recreate(request).await
            }
            // A rolled-back update leaves the stack stable and updatable.
            StatusCategory::Completed | StatusCategory::Rollback => self.update(request).await,
        }
    }

    /// Delete a failed stack, verify it is gone, then create it fresh.
    async fn recreate(&self, request: &DeploymentRequest) -> Result<Deployed> {
        let stack = &request.stack_name;
        tracing::warn!("Stack {} is in a failed state, deleting it", stack);
        self.api.delete_stack(stack).await?;

        wait_for_stack(self.api, stack, &self.wait).await?;

        if self.api.stack_status(stack).await?.is_some() {
            return Err(StackError::DeleteIncomplete(stack.clone()));
        }

        tracing::info!("Creating stack {}", stack);
        self.api.create_stack(request).await?;
        Ok(Deployed::Recreated)
    }

    /// Update a live stack through a change set.
    async fn update(&self, request: &DeploymentRequest) -> Result<Deployed> {
        let stack = &request.stack_name;
        let change_set = request.change_set_name();

        tracing::info!("Creating change set {} for stack {}", change_set, stack);
        self.api.create_change_set(request, &change_set).await?;

        // The change set must not outlive this call: every path below either
        // executes it or discards it.
        let state = match self.wait_for_change_set(stack, &change_set).await {
            Ok(state) => state,
            Err(err) => {
                self.discard_change_set(stack, &change_set).await;
                return Err(err);
            }
        };

        match state {
            ChangeSetState::NoChanges => {
                tracing::info!("No changes detected, discarding change set {}", change_set);
                self.api.delete_change_set(stack, &change_set).await?;
                Ok(Deployed::NoChanges)
            }
            ChangeSetState::Ready => {
                tracing::info!("Executing change set {}", change_set);
                self.api.execute_change_set(stack, &change_set).await?;
                match wait_for_stack(self.api, stack, &self.wait).await? {
                    WaitOutcome::Completed { .. } => Ok(Deployed::Updated),
                    WaitOutcome::Failed { status } => Err(StackError::OperationFailed {
                        stack: stack.clone(),
                        status,
                    }),
                    WaitOutcome::TimedOut { status } => Err(StackError::Timeout(format!(
                        "stack {stack} update still {status} after {:?}",
                        self.wait.timeout
                    ))),
                    WaitOutcome::DoesNotExist => Err(StackError::OperationFailed {
                        stack: stack.clone(),
                        status: "DOES_NOT_EXIST".to_string(),
                    }),
                }
            }
            ChangeSetState::Failed(reason) => {
                self.discard_change_set(stack, &change_set).await;
                Err(StackError::ChangeSetFailed(reason))
            }
            // wait_for_change_set only returns once building is over
            ChangeSetState::Building => unreachable!(),
        }
    }

    /// Discard a change set that will not be executed. The caller is about
    /// to surface an error, so a discard failure is only logged.
    async fn discard_change_set(&self, stack: &str, name: &str) {
        if let Err(err) = self.api.delete_change_set(stack, name).await {
            tracing::warn!("Failed to discard change set {}: {}", name, err);
        }
    }

    /// Poll a change set until it finishes building.
    async fn wait_for_change_set(&self, stack: &str, name: &str) -> Result<ChangeSetState> {
        let start = Instant::now();
        loop {
            let state = self.api.change_set_state(stack, name).await?;
            if state != ChangeSetState::Building {
                return Ok(state);
            }
            if start.elapsed() >= self.wait.timeout {
                return Err(StackError::Timeout(format!(
                    "change set {name} for stack {stack} did not finish building"
                )));
            }
            tracing::debug!("Change set {} still building", name);
            sleep(self.wait.interval).await;
        }
    }
}
