//! Command-line arguments

use burst_client::{BurstConfig, ClientConfig, FailurePolicy};
use clap::Parser;
use std::ffi::OsString;

/// Long flags that may also be written with a single dash, as in `-requests=3`
const LONG_FLAGS: &[&str] = &[
    "region",
    "endpoint",
    "access",
    "secret",
    #[cfg(feature = "get-object")]
    "bucket",
    #[cfg(feature = "get-object")]
    "key",
    "requests",
    "collect",
    "virtual-hosted",
    "debug",
    "json-logs",
    "help",
    "version",
];

#[derive(Parser, Debug, Clone)]
#[command(name = "s3-burst")]
#[command(about = "Fire concurrent requests at an S3-compatible endpoint")]
#[command(version)]
pub struct Args {
    /// The region to send requests to
    #[arg(long, default_value = "", env = "BURST_REGION")]
    pub region: String,

    /// The endpoint URL to send requests to
    #[arg(long, default_value = "", env = "BURST_ENDPOINT")]
    pub endpoint: String,

    /// Static access key
    #[arg(long, default_value = "", env = "BURST_ACCESS_KEY")]
    pub access: String,

    /// Static secret key
    #[arg(long, default_value = "", env = "BURST_SECRET_KEY", hide_env_values = true)]
    pub secret: String,

    /// Bucket to get the object from
    #[cfg(feature = "get-object")]
    #[arg(long, default_value = "", env = "BURST_BUCKET")]
    pub bucket: String,

    /// Key of the object to download
    #[cfg(feature = "get-object")]
    #[arg(long, default_value = "", env = "BURST_KEY")]
    pub key: String,

    /// Number of simultaneous requests
    #[arg(
        long,
        default_value_t = 1,
        env = "BURST_REQUESTS",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub requests: u32,

    /// Await every request and report counts instead of exiting on the first failure
    #[arg(long, env = "BURST_COLLECT")]
    pub collect: bool,

    /// Use virtual-hosted addressing with a custom endpoint
    #[arg(long, env = "BURST_VIRTUAL_HOSTED")]
    pub virtual_hosted: bool,

    /// Enable debug logging
    #[arg(short, long, env = "BURST_DEBUG")]
    pub debug: bool,

    /// Emit logs as JSON
    #[arg(long, env = "BURST_JSON_LOGS")]
    pub json_logs: bool,
}

impl Args {
    /// Parse from Go-style or GNU-style arguments
    pub fn parse_normalized<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::parse_from(normalize_args(args))
    }

    /// Fallible variant of [`Args::parse_normalized`]
    pub fn try_parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    /// Build the run configuration
    pub fn to_config(&self) -> BurstConfig {
        let client = ClientConfig::new(&self.access, &self.secret)
            .with_endpoint(&self.endpoint)
            .with_region(&self.region)
            .with_path_style(!self.virtual_hosted);

        let policy = if self.collect {
            FailurePolicy::Collect
        } else {
            FailurePolicy::FailFast
        };

        let config = BurstConfig::new(client)
            .with_requests(self.requests as usize)
            .with_failure_policy(policy);

        #[cfg(feature = "get-object")]
        let config = config.with_object(&self.bucket, &self.key);

        config
    }
}

/// Rewrite single-dash long flags (`-bucket=test`, `-requests 3`) to `--bucket=test`.
///
/// Short flags, values and everything after `--` pass through untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(s) = arg.to_str() else {
                return arg;
            };
            if s == "--" {
                passthrough = true;
                return arg;
            }
            match s.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split('=').next().unwrap_or(rest);
                    if LONG_FLAGS.contains(&name) {
                        OsString::from(format!("-{s}"))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}
