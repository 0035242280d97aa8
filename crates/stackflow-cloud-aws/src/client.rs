//! CloudFormation-backed [`StackApi`] implementation

use crate::session;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_cloudformation::Client;
use aws_sdk_cloudformation::types::{ChangeSetStatus, ChangeSetType};
use stackflow_cloud::{
    ChangeSetState, DeploymentRequest, Result, StackApi, StackError, StackOutput, TemplateSource,
};

/// Phrasings CloudFormation uses for an empty diff.
const NO_CHANGES_MARKERS: &[&str] = &[
    "didn't contain changes",
    "No updates are to be performed",
];

/// CloudFormation client scoped to one profile/region pair
pub struct CloudFormationApi {
    client: Client,
}

impl CloudFormationApi {
    /// Acquire a client for the given profile and region. The client is
    /// released when the value is dropped.
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

    /// Convert the request's capability flags to SDK values.
    fn capabilities(request: &DeploymentRequest) -> Vec<aws_sdk_cloudformation::types::Capability> {
        request
            .capabilities
            .iter()
            .map(|capability| aws_sdk_cloudformation::types::Capability::from(capability.as_str()))
            .collect()
    }

    /// Convert the request's parameters to SDK values.
    fn parameters(request: &DeploymentRequest) -> Vec<aws_sdk_cloudformation::types::Parameter> {
        request
            .parameters
            .iter()
            .map(|parameter| {
                aws_sdk_cloudformation::types::Parameter::builder()
                    .parameter_key(&parameter.key)
                    .parameter_value(&parameter.value)
                    .build()
            })
            .collect()
    }

    /// Convert the request's tags to SDK values.
    fn tags(request: &DeploymentRequest) -> Result<Vec<aws_sdk_cloudformation::types::Tag>> {
        Ok(request
            .tags
            .iter()
            .map(|tag| {
                aws_sdk_cloudformation::types::Tag::builder()
                    .key(&tag.key)
                    .value(&tag.value)
                    .build()
            })
            .collect())
    }
}

#[async_trait]
impl StackApi for CloudFormationApi {
    async fn stack_status(&self, stack: &str) -> Result<Option<String>> {
        match self
            .client
            .describe_stacks()
            .stack_name(stack)
            .send()
            .await
        {
            Ok(output) => Ok(output
                .stacks()
                .first()
                .and_then(|s| s.stack_status())
                .map(|status| status.as_str().to_string())),
            Err(err) => {
                let service = err.into_service_error();
                // Missing stacks surface as a ValidationError, not a typed
                // variant; the message is the only discriminator.
                if service
                    .meta()
                    .message()
                    .is_some_and(|message| message.contains("does not exist"))
                {
                    Ok(None)
                } else {
                    Err(StackError::ApiError(service.to_string()))
                }
            }
        }
    }

    async fn create_stack(&self, request: &DeploymentRequest) -> Result<()> {
        let mut call = self
            .client
            .create_stack()
            .stack_name(&request.stack_name)
            .set_capabilities(Some(Self::capabilities(request)))
            .set_parameters(Some(Self::parameters(request)))
            .set_tags(Some(Self::tags(request)?));

        call = match &request.template {
            TemplateSource::S3 { .. } => match request.template.url() {
                Some(url) => call.template_url(url),
                None => return Err(StackError::MissingTemplateSource),
            },
            TemplateSource::Body(body) => call.template_body(body),
        };

        call.send()
            .await
            .map_err(|err| StackError::ApiError(err.into_service_error().to_string()))?;
        Ok(())
    }

    async fn delete_stack(&self, stack: &str) -> Result<()> {
        self.client
            .delete_stack()
            .stack_name(stack)
            .send()
            .await
            .map_err(|err| StackError::ApiError(err.into_service_error().to_string()))?;
        Ok(())
    }

    async fn create_change_set(&self, request: &DeploymentRequest, name: &str) -> Result<()> {
        let mut call = self
            .client
            .create_change_set()
            .stack_name(&request.stack_name)
            .change_set_name(name)
            .change_set_type(ChangeSetType::Update)
            .set_capabilities(Some(Self::capabilities(request)))
            .set_parameters(Some(Self::parameters(request)))
            .set_tags(Some(Self::tags(request)?));

        call = match &request.template {
            TemplateSource::S3 { .. } => match request.template.url() {
                Some(url) => call.template_url(url),
                None => return Err(StackError::MissingTemplateSource),
            },
            TemplateSource::Body(body) => call.template_body(body),
        };

        call.send()
            .await
            .map_err(|err| StackError::ApiError(err.into_service_error().to_string()))?;
        Ok(())
    }

    async fn change_set_state(&self, stack: &str, name: &str) -> Result<ChangeSetState> {
        let output = self
            .client
            .describe_change_set()
            .stack_name(stack)
            .change_set_name(name)
            .send()
            .await
            .map_err(|err| StackError::ApiError(err.into_service_error().to_string()))?;

        let state = match output.status() {
            Some(ChangeSetStatus::CreatePending | ChangeSetStatus::CreateInProgress) => {
                ChangeSetState::Building
            }
            Some(ChangeSetStatus::CreateComplete) => ChangeSetState::Ready,
            Some(ChangeSetStatus::Failed) => {
                let reason = output.status_reason().unwrap_or_default();
                if NO_CHANGES_MARKERS
                    .iter()
                    .any(|marker| reason.contains(marker))
                {
                    ChangeSetState::NoChanges
                } else {
                    ChangeSetState::Failed(reason.to_string())
                }
            }
            other => ChangeSetState::Failed(format!(
                "unexpected change set status: {}",
                other.map_or("none", |status| status.as_str())
            )),
        };
        Ok(state)
    }

    async fn execute_change_set(&self, stack: &str, name: &str) -> Result<()> {
        self.client
            .execute_change_set()
            .stack_name(stack)
            .change_set_name(name)
            .send()
            .await
            .map_err(|err| StackError::ApiError(err.into_service_error().to_string()))?;
        Ok(())
    }

    async fn delete_change_set(&self, stack: &str, name: &str) -> Result<()> {
        self.client
            .delete_change_set()
            .stack_name(stack)
            .change_set_name(name)
            .send()
            .await
            .map_err(|err| StackError::ApiError(err.into_service_error().to_string()))?;
        Ok(())
    }

    async fn stack_outputs(&self, stack: &str) -> Result<Vec<StackOutput>> {
        let output = self
            .client
            .describe_stacks()
            .stack_name(stack)
            .send()
            .await
            .map_err(|err| StackError::ApiError(err.into_service_error().to_string()))?;

        let outputs = output
            .stacks()
            .first()
            .map(|s| s.outputs())
            .unwrap_or_default()
            .iter()
            .filter_map(|entry| {
                Some(StackOutput::new(entry.output_key()?, entry.output_value()?))
            })
            .collect();
        Ok(outputs)
    }
}
