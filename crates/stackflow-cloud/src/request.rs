//! Deployment request model
//!
//! A [`DeploymentRequest`] carries everything one deploy call needs: the
//! stack name, the template source, capability flags, parameters, tags, and
//! the timestamp used to name change sets and template objects. It is
//! constructed by the caller, consumed once, and never persisted.

use chrono::Utc;
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StackError};

/// MD5 hex digest of a string, used to fingerprint template contents for
/// the object key.
pub fn stack_hash(input: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Object key for an uploaded template: `{timestamp}-{hash}.json`.
pub fn template_key(timestamp: i64, hash: &str) -> String {
    format!("{timestamp}-{hash}.json")
}

/// Where the stack template lives
///
/// The two variants are mutually exclusive: a template is either hosted in
/// an object storage bucket and referenced by URL, or passed inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateSource {
    /// Template stored in an S3 bucket, referenced by URL. This code only
    /// assembles the URL; it performs no storage I/O.
    S3 {
        bucket: String,
        prefix: String,
        key: String,
    },
    /// Inline template body
    Body(String),
}

impl TemplateSource {
    pub fn s3(
        bucket: impl Into<String>,
        prefix: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self::S3 {
            bucket: bucket.into(),
            prefix: prefix.into(),
            key: key.into(),
        }
    }

    pub fn body(body: impl Into<String>) -> Self {
        Self::Body(body.into())
    }

    /// Template URL for the S3 variant, `None` for an inline body. An empty
    /// prefix contributes no path segment.
    pub fn url(&self) -> Option<String> {
        match self {
            Self::S3 {
                bucket,
                prefix,
                key,
            } => {
                if prefix.is_empty() {
                    Some(format!("https://{bucket}.s3.amazonaws.com/{key}"))
                } else {
                    Some(format!("https://{bucket}.s3.amazonaws.com/{prefix}/{key}"))
                }
            }
            Self::Body(_) => None,
        }
    }

    /// Check that the source actually points at a template.
    fn validate(&self) -> Result<()> {
        let missing = match self {
            Self::S3 {
                bucket,
                prefix: _,
                key,
            } => bucket.is_empty() || key.is_empty(),
            Self::Body(body) => body.is_empty(),
        };
        if missing {
            return Err(StackError::MissingTemplateSource);
        }
        Ok(())
    }
}

/// IAM capability flags a template may require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Iam,
    NamedIam,
    AutoExpand,
}

impl Capability {
    /// Wire value expected by the provisioning API.
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::Iam => "CAPABILITY_IAM",
            Capability::NamedIam => "CAPABILITY_NAMED_IAM",
            Capability::AutoExpand => "CAPABILITY_AUTO_EXPAND",
        }
    }
}

/// Template parameter key/value pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub key: String,
    pub value: String,
}

impl Parameter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Stack tag key/value pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Desired stack definition for a single deploy call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentRequest {
    /// Credentials profile to deploy with, `None` for the default chain
    pub profile: Option<String>,

    /// Target region
    pub region: String,

    /// Stack name
    pub stack_name: String,

    /// Template location or body
    pub template: TemplateSource,

    /// Capability flags required by the template
    pub capabilities: Vec<Capability>,

    /// Template parameters
    pub parameters: Vec<Parameter>,

    /// Stack tags
    pub tags: Vec<Tag>,

    /// Epoch timestamp of the build; names change sets and template keys
    pub timestamp: i64,
}

impl DeploymentRequest {
    pub fn new(
        stack_name: impl Into<String>,
        region: impl Into<String>,
        template: TemplateSource,
    ) -> Self {
        Self {
            profile: None,
            region: region.into(),
            stack_name: stack_name.into(),
            template,
            capabilities: Vec::new(),
            parameters: Vec::new(),
            tags: Vec::new(),
            timestamp: Utc::now().timestamp(),
        }
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.push(capability);
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push(Parameter::new(key, value));
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(Tag::new(key, value));
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Change set name derived from the request timestamp.
    pub fn change_set_name(&self) -> String {
        format!("stackflow-{}", self.timestamp)
    }

    /// Check the request is deployable before any remote call is made.
    pub fn validate(&self) -> Result<()> {
        self.template.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_hash() {
        // MD5 of "hello"
        assert_eq!(stack_hash("hello"), "5d41402abc4b2a76b9719d911017c592");
    }

    #[test]
    fn test_template_key() {
        assert_eq!(
            template_key(1700000000, "abc123"),
            "1700000000-abc123.json"
        );
    }

    #[test]
    fn test_template_url() {
        let source = TemplateSource::s3("builds", "releases/prod", "1700000000-abc.json");
        assert_eq!(
            source.url().unwrap(),
            "https://builds.s3.amazonaws.com/releases/prod/1700000000-abc.json"
        );
        assert_eq!(TemplateSource::body("{}").url(), None);
    }

    #[test]
    fn test_template_url_without_prefix() {
        // No double slash when the prefix is empty.
        let source = TemplateSource::s3("builds", "", "1700000000-abc.json");
        assert_eq!(
            source.url().unwrap(),
            "https://builds.s3.amazonaws.com/1700000000-abc.json"
        );
    }

    #[test]
    fn test_validate_rejects_empty_sources() {
        let request = DeploymentRequest::new(
            "web",
            "us-east-1",
            TemplateSource::s3("", "prefix", "key.json"),
        );
        assert!(matches!(
            request.validate(),
            Err(StackError::MissingTemplateSource)
        ));

        let request = DeploymentRequest::new("web", "us-east-1", TemplateSource::body(""));
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_change_set_name() {
        let request =
            DeploymentRequest::new("web", "us-east-1", TemplateSource::body("{}"))
                .with_timestamp(1700000000);
        assert_eq!(request.change_set_name(), "stackflow-1700000000");
    }

    #[test]
    fn test_builders() {
        let request = DeploymentRequest::new("web", "eu-west-1", TemplateSource::body("{}"))
            .with_profile("ci")
            .with_capability(Capability::NamedIam)
            .with_parameter("Env", "prod")
            .with_tag("team", "platform");

        assert_eq!(request.profile.as_deref(), Some("ci"));
        assert_eq!(request.capabilities, vec![Capability::NamedIam]);
        assert_eq!(request.parameters[0].key, "Env");
        assert_eq!(request.tags[0].value, "platform");
    }
}
