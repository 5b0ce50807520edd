//! Object storage seam and its AWS SDK implementation

use crate::{ClientConfig, ClientError, Result};
use async_trait::async_trait;
use aws_config::{retry::RetryConfig, AppName, BehaviorVersion, Region};
use aws_sdk_s3::{config::Credentials, Client};
use tracing::{debug, instrument, warn};

/// Body of a fetched object after it has been read and discarded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrainedObject {
    /// Bytes read before the stream ended
    pub bytes: u64,
    /// False when the stream ended with a read error instead of EOF
    pub complete: bool,
}

/// The two remote calls a run can repeat.
///
/// Implementations are shared read-only across every concurrent invocation.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List buckets, returning how many were listed
    async fn list_buckets(&self) -> Result<usize>;

    /// Fetch an object and drain its body to the end of the stream
    async fn get_object(&self, bucket: &str, key: &str) -> Result<DrainedObject>;
}

/// [`ObjectStore`] backed by `aws-sdk-s3`
#[derive(Clone, Debug)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    /// Build a client bound to static credentials and an optional endpoint override.
    ///
    /// Retries are disabled; each call is a single attempt.
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let app_name = AppName::new(config.app_name.clone())
            .map_err(|e| ClientError::Config(format!("invalid app name: {e}")))?;
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "s3-burst-static",
        );

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .app_name(app_name)
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled());

        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.uses_path_style())
            .build();

        debug!(
            endpoint = config.endpoint.as_deref().unwrap_or("<default>"),
            region = config.region.as_deref().unwrap_or("<default>"),
            path_style = config.uses_path_style(),
            "Built S3 client"
        );

        Ok(Self::from_client(Client::from_conf(s3_config)))
    }

    /// Wrap an already configured SDK client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// The underlying SDK client
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    #[instrument(skip(self))]
    async fn list_buckets(&self) -> Result<usize> {
        let output = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|e| ClientError::from_sdk("ListBuckets", e))?;

        Ok(output.buckets().len())
    }

    #[instrument(skip(self))]
    async fn get_object(&self, bucket: &str, key: &str) -> Result<DrainedObject> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| ClientError::from_sdk("GetObject", e))?;

        let mut body = output.body;
        let mut bytes = 0u64;
        loop {
            match body.try_next().await {
                Ok(Some(chunk)) => bytes += chunk.len() as u64,
                Ok(None) => return Ok(DrainedObject { bytes, complete: true }),
                // A broken body still counts as drained; only the call itself can fail.
                Err(e) => {
                    warn!(bytes, error = %e, "Object body ended early");
                    return Ok(DrainedObject {
                        bytes,
                        complete: false,
                    });
                }
            }
        }
    }
}
