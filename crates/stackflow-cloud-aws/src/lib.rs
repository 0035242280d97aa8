//! Stackflow AWS backend
//!
//! CloudFormation and SSM implementations of the `stackflow-cloud` trait
//! seams. Clients are acquired per call site from a freshly loaded session
//! ([`session::load_config`]) and released when dropped.

pub mod client;
pub mod params;
pub mod session;

// Re-exports
pub use client::CloudFormationApi;
pub use params::SsmParameterStore;
