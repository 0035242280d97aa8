use stackflow_cloud::get_output;
use stackflow_cloud_aws::CloudFormationApi;

pub async fn handle(
    profile: Option<&str>,
    region: &str,
    stack: &str,
    key: &str,
) -> anyhow::Result<()> {
    let api = CloudFormationApi::connect(profile, region).await;
    let value = get_output(&api, stack, key).await?;

    // Bare value on stdout so it can be piped.
    println!("{value}");
    Ok(())
}
