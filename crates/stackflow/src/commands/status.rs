use colored::Colorize;
use stackflow_cloud::{StackApi, StatusCategory};
use stackflow_cloud_aws::CloudFormationApi;

pub async fn handle(profile: Option<&str>, region: &str, stack: &str) -> anyhow::Result<()> {
    let api = CloudFormationApi::connect(profile, region).await;

    match api.stack_status(stack).await? {
        Some(status) => {
            let category = StatusCategory::classify(&status);
            println!(
                "Stack {}: {} ({})",
                stack.cyan(),
                status.bold(),
                category
            );
        }
        None => {
            println!("Stack {}: {}", stack.cyan(), "does not exist".yellow());
        }
    }
    Ok(())
}
