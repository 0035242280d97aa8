use crate::utils;
use colored::Colorize;
use stackflow_cloud::{DeploymentRequest, StackDeployer, TemplateSource, WaitConfig};
use stackflow_cloud_aws::CloudFormationApi;
use std::path::Path;
use std::time::Duration;

#[allow(clippy::too_many_arguments)]
pub async fn handle(
    profile: Option<&str>,
    region: &str,
    stack: &str,
    template_bucket: Option<&str>,
    template_prefix: &str,
    template_key: Option<&str>,
    template_file: Option<&Path>,
    capabilities: &[String],
    parameters: &[String],
    tags: &[String],
    timeout: Duration,
) -> anyhow::Result<()> {
    let template = match (template_bucket, template_file) {
        (Some(bucket), None) => {
            let key = template_key.ok_or_else(|| {
                anyhow::anyhow!("--template-key is required with --template-bucket")
            })?;
            TemplateSource::s3(bucket, template_prefix, key)
        }
        (None, Some(path)) => TemplateSource::body(std::fs::read_to_string(path)?),
        _ => anyhow::bail!("Provide either --template-bucket/--template-key or --template-file"),
    };

    let mut request = DeploymentRequest::new(stack, region, template);
    if let Some(profile) = profile {
        request = request.with_profile(profile);
    }
    for capability in capabilities {
        request = request.with_capability(utils::parse_capability(capability)?);
    }
    for parameter in parameters {
        let (key, value) = utils::parse_key_value(parameter)?;
        request = request.with_parameter(key, value);
    }
    for tag in tags {
        let (key, value) = utils::parse_key_value(tag)?;
        request = request.with_tag(key, value);
    }

    tracing::debug!("Deployment request: {:?}", request);
    println!("{}", format!("Deploying stack {stack}...").blue().bold());

    let api = CloudFormationApi::connect(profile, region).await;
    let deployer = StackDeployer::new(&api).with_wait_config(WaitConfig {
        timeout,
        ..WaitConfig::default()
    });

    let deployed = deployer.deploy(&request).await?;
    println!(
        "  ✓ Stack {}: {}",
        stack.cyan(),
        deployed.to_string().green()
    );
    Ok(())
}
