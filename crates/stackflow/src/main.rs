mod commands;
mod utils;

use clap::{Parser, Subcommand};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "stackflow")]
#[command(about = "Deploy CloudFormation stacks and wait for them to settle", long_about = None)]
struct Cli {
    /// AWS credentials profile (defaults to the standard chain)
    #[arg(long, env = "AWS_PROFILE", global = true)]
    profile: Option<String>,

    /// AWS region
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1", global = true)]
    region: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy a stack: create, update via change set, or recreate as needed
    Deploy {
        /// Stack name
        stack: String,
        /// S3 bucket holding the uploaded template
        #[arg(long, conflicts_with = "template_file")]
        template_bucket: Option<String>,
        /// Key prefix (folder) inside the template bucket
        #[arg(long, default_value = "", conflicts_with = "template_file")]
        template_prefix: String,
        /// Object key of the uploaded template, e.g. 1700000000-abc123.json
        #[arg(long, conflicts_with = "template_file")]
        template_key: Option<String>,
        /// Local template file to send inline instead of an S3 reference
        #[arg(long)]
        template_file: Option<std::path::PathBuf>,
        /// Capability flags (iam, named-iam, auto-expand)
        #[arg(long = "capability")]
        capabilities: Vec<String>,
        /// Template parameters as KEY=VALUE
        #[arg(long = "parameter")]
        parameters: Vec<String>,
        /// Stack tags as KEY=VALUE
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Give up on in-deploy waits after this many seconds
        #[arg(long, default_value = "600")]
        timeout: u64,
    },
    /// Show the current stack status and its classification
    Status {
        /// Stack name
        stack: String,
    },
    /// Wait for a stack to leave the in-progress state
    Wait {
        /// Stack name
        stack: String,
        /// Give up after this many seconds
        #[arg(long, default_value = "600")]
        timeout: u64,
        /// Seconds between status polls
        #[arg(long, default_value = "10")]
        interval: u64,
    },
    /// Read a named output from a completed stack
    Output {
        /// Stack name
        stack: String,
        /// Output key
        key: String,
    },
    /// Read a value from the SSM parameter store
    Param {
        /// Parameter name
        name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout is reserved for command results so they can
    // be piped (output/param print bare values).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let profile = cli.profile.as_deref();
    let region = cli.region.as_str();

    match cli.command {
        Commands::Deploy {
            stack,
            template_bucket,
            template_prefix,
            template_key,
            template_file,
            capabilities,
            parameters,
            tags,
            timeout,
        } => {
            commands::deploy::handle(
                profile,
                region,
                &stack,
                template_bucket.as_deref(),
                &template_prefix,
                template_key.as_deref(),
                template_file.as_deref(),
                &capabilities,
                &parameters,
                &tags,
                Duration::from_secs(timeout),
            )
            .await
        }
        Commands::Status { stack } => commands::status::handle(profile, region, &stack).await,
        Commands::Wait {
            stack,
            timeout,
            interval,
        } => {
            commands::wait::handle(
                profile,
                region,
                &stack,
                Duration::from_secs(timeout),
                Duration::from_secs(interval),
            )
            .await
        }
        Commands::Output { stack, key } => {
            commands::output::handle(profile, region, &stack, &key).await
        }
        Commands::Param { name } => commands::param::handle(profile, region, &name).await,
    }
}
