//! SSM-backed [`ParameterStore`] implementation

use crate::session;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_ssm::Client;
use stackflow_cloud::{ParameterStore, Result, StackError};

/// SSM Parameter Store client scoped to one profile/region pair
pub struct SsmParameterStore {
    client: Client,
}

impl SsmParameterStore {
    /// Acquire a client for the given profile and region.
    pub async fn connect(profile: Option<&str>, region: &str) -> Self {
        let config = session::load_config(profile, region).await;
        Self::from_config(&config)
    }

    /// Build a client from an already-loaded session.
    pub fn from_config(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl ParameterStore for SsmParameterStore {
    async fn get_parameter(&self, name: &str) -> Result<Option<String>> {
        match self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await
        {
            Ok(output) => Ok(output
                .parameter()
                .and_then(|parameter| parameter.value())
                .map(str::to_string)),
            Err(err) => {
                let service = err.into_service_error();
                if service.is_parameter_not_found() {
                    Ok(None)
                } else {
                    Err(StackError::ApiError(service.to_string()))
                }
            }
        }
    }
}
