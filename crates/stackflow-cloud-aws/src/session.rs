//! Scoped AWS session configuration
//!
//! A session is loaded per call site and handed to the service clients built
//! from it. Nothing is cached process-wide; dropping the client releases the
//! session on every exit path.

use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Load SDK configuration for the given profile and region.
///
/// `profile` of `None` falls back to the default credentials chain
/// (environment, shared config, instance metadata).
pub async fn load_config(profile: Option<&str>, region: &str) -> SdkConfig {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));
    if let Some(profile) = profile {
        loader = loader.profile_name(profile);
    }
    tracing::debug!(
        "Loading AWS config (profile: {}, region: {})",
        profile.unwrap_or("default"),
        region
    );
    loader.load().await
}
