//! Stackflow Cloud
//!
//! Provider-independent core of Stackflow: stack status classification, the
//! deployment request model, and the deploy/wait/read logic, all expressed
//! against the [`StackApi`] trait so backends and tests plug in underneath.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 Stackflow CLI                    │
//! │        (stackflow deploy/wait/output)            │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               stackflow-cloud                    │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  StackDeployer / waiter / output reader   │   │
//! │  │  trait StackApi { ... }                   │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │ status tables│  │ request model│            │
//! │  └──────────────┘  └──────────────┘            │
//! └───────────────────────┬─────────────────────────┘
//!                         │
//!               ┌─────────▼─────────┐
//!               │ stackflow-cloud-aws│
//!               │ (CloudFormation)   │
//!               └───────────────────┘
//! ```

pub mod api;
pub mod deployer;
pub mod error;
pub mod outputs;
pub mod params;
pub mod request;
pub mod status;
pub mod waiter;

#[cfg(test)]
pub(crate) mod testutil;

// Re-exports
pub use api::{ChangeSetState, ParameterStore, StackApi, StackOutput};
pub use deployer::{Deployed, StackDeployer};
pub use error::{Result, StackError};
pub use outputs::get_output;
pub use params::require_parameter;
pub use request::{
    Capability, DeploymentRequest, Parameter, Tag, TemplateSource, stack_hash, template_key,
};
pub use status::StatusCategory;
pub use waiter::{WaitConfig, WaitOutcome, wait_for_stack};
