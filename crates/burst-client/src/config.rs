//! Client and run configuration

use crate::{ClientError, Operation, Result};
use url::Url;

/// Connection settings for the S3-compatible endpoint
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Endpoint URL override; `None` keeps the SDK's default resolution
    pub endpoint: Option<String>,
    /// Region override; `None` keeps the SDK's default region chain
    pub region: Option<String>,
    /// Static access key
    pub access_key: String,
    /// Static secret key
    pub secret_key: String,
    /// Use path-style addressing when a custom endpoint is set
    pub force_path_style: bool,
    /// App name reported in the SDK user agent
    pub app_name: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            region: None,
            access_key: String::new(),
            secret_key: String::new(),
            force_path_style: true,
            app_name: "s3-burst".to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new config with static credentials
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self::default().with_credentials(access_key, secret_key)
    }

    /// Set a custom endpoint. Empty strings leave the endpoint unset.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = non_empty(endpoint.into());
        self
    }

    /// Set the region. Empty strings leave the region unset.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = non_empty(region.into());
        self
    }

    /// Set static credentials
    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = access_key.into();
        self.secret_key = secret_key.into();
        self
    }

    /// Toggle path-style addressing for custom endpoints
    pub fn with_path_style(mut self, force_path_style: bool) -> Self {
        self.force_path_style = force_path_style;
        self
    }

    /// Set the user agent app name
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    /// Whether path-style addressing applies to the built client
    pub fn uses_path_style(&self) -> bool {
        self.endpoint.is_some() && self.force_path_style
    }

    /// Check the configuration before any client is built
    pub fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.endpoint {
            let url = Url::parse(endpoint)
                .map_err(|e| ClientError::Config(format!("invalid endpoint {endpoint:?}: {e}")))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ClientError::Config(format!(
                    "unsupported endpoint scheme {:?}",
                    url.scheme()
                )));
            }
        }

        if self.access_key.is_empty() || self.secret_key.is_empty() {
            return Err(ClientError::Credentials(
                "static access key and secret key must both be set".to_string(),
            ));
        }

        Ok(())
    }
}

/// How the dispatcher reacts to a failed invocation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Return on the first failure without awaiting or cancelling siblings
    #[default]
    FailFast,
    /// Await every invocation and report aggregate counts
    Collect,
}

/// Everything needed for one run of the tool
#[derive(Clone, Debug)]
pub struct BurstConfig {
    /// Endpoint and credentials
    pub client: ClientConfig,
    /// Bucket for object-fetch mode
    pub bucket: Option<String>,
    /// Object key for object-fetch mode
    pub key: Option<String>,
    /// Number of concurrent invocations
    pub requests: usize,
    /// Failure handling
    pub failure_policy: FailurePolicy,
}

impl BurstConfig {
    /// Create a bucket-listing run with a single request
    pub fn new(client: ClientConfig) -> Self {
        Self {
            client,
            bucket: None,
            key: None,
            requests: 1,
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Set the object to fetch. Empty strings are treated as unset.
    pub fn with_object(mut self, bucket: impl Into<String>, key: impl Into<String>) -> Self {
        self.bucket = non_empty(bucket.into());
        self.key = non_empty(key.into());
        self
    }

    /// Set the number of concurrent invocations
    pub fn with_requests(mut self, requests: usize) -> Self {
        self.requests = requests;
        self
    }

    /// Set the failure policy
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// The operation this configuration selects
    pub fn operation(&self) -> Operation {
        Operation::select(self.bucket.as_deref(), self.key.as_deref())
    }

    /// Check the configuration before any client is built
    pub fn validate(&self) -> Result<()> {
        if self.requests == 0 {
            return Err(ClientError::Config(
                "requests must be at least 1".to_string(),
            ));
        }
        self.client.validate()
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
