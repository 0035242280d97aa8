use stackflow_cloud::Capability;

/// Split a KEY=VALUE argument.
pub fn parse_key_value(raw: &str) -> anyhow::Result<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(anyhow::anyhow!(
            "Expected KEY=VALUE, got '{}'",
            raw
        )),
    }
}

/// Map a CLI capability name onto a capability flag.
pub fn parse_capability(raw: &str) -> anyhow::Result<Capability> {
    match raw {
        "iam" | "CAPABILITY_IAM" => Ok(Capability::Iam),
        "named-iam" | "CAPABILITY_NAMED_IAM" => Ok(Capability::NamedIam),
        "auto-expand" | "CAPABILITY_AUTO_EXPAND" => Ok(Capability::AutoExpand),
        other => Err(anyhow::anyhow!(
            "Unknown capability '{}': expected iam, named-iam, or auto-expand",
            other
        )),
    }
}
