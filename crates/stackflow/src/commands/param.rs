use stackflow_cloud::require_parameter;
use stackflow_cloud_aws::SsmParameterStore;

pub async fn handle(profile: Option<&str>, region: &str, name: &str) -> anyhow::Result<()> {
    let store = SsmParameterStore::connect(profile, region).await;
    let value = require_parameter(&store, name).await?;

    // Bare value on stdout so it can be piped.
    println!("{value}");
    Ok(())
}
