use colored::Colorize;
use stackflow_cloud::{WaitConfig, WaitOutcome, wait_for_stack};
use stackflow_cloud_aws::CloudFormationApi;
use std::time::Duration;

pub async fn handle(
    profile: Option<&str>,
    region: &str,
    stack: &str,
    timeout: Duration,
    interval: Duration,
) -> anyhow::Result<()> {
    let api = CloudFormationApi::connect(profile, region).await;
    let config = WaitConfig { timeout, interval };

    println!(
        "{}",
        format!("Waiting for stack {stack} to settle...").blue()
    );

    // A timeout is an outcome, not an error.
    match wait_for_stack(&api, stack, &config).await? {
        WaitOutcome::Completed { status } => {
            println!("  ✓ Stack {}: {}", stack.cyan(), status.green());
        }
        WaitOutcome::Failed { status } => {
            println!("  ✗ Stack {}: {}", stack.cyan(), status.red());
        }
        WaitOutcome::DoesNotExist => {
            println!("  - Stack {} does not exist", stack.cyan());
        }
        WaitOutcome::TimedOut { status } => {
            println!(
                "  ⧗ Stack {} still {} after {:?}",
                stack.cyan(),
                status.yellow(),
                timeout
            );
        }
    }
    Ok(())
}
