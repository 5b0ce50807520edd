//! # s3-burst
//!
//! Command-line load generator for S3-compatible object storage.
//!
//! Flags select between bucket listing and object retrieval, and how many
//! concurrent requests to fire. The process exits non-zero on the first
//! failure, or, with `--collect`, after all requests when any of them failed.

pub mod args;
pub mod logging;

pub use args::{normalize_args, Args};

use burst_client::{BurstConfig, DispatchError, RunSummary};

/// Run the requests described by `config`
pub async fn execute(config: &BurstConfig) -> Result<RunSummary, DispatchError> {
    burst_client::run(config).await
}

/// Process exit status for a finished run
pub fn exit_code(result: &Result<RunSummary, DispatchError>) -> i32 {
    match result {
        Ok(summary) if summary.is_success() => 0,
        _ => 1,
    }
}

/// The message logged before a fatal exit
pub fn fatal_message(err: &DispatchError) -> String {
    match err {
        DispatchError::Client(e) => format!("unable to load SDK config: {e}"),
        DispatchError::Invocation {
            index,
            operation: "ListBuckets",
            source,
        } => format!("unable to list buckets (request #{index}): {source}"),
        DispatchError::Invocation { index, source, .. } => {
            format!("unable to get object from a bucket (request #{index}): {source}")
        }
        DispatchError::Panicked { index } => format!("request #{index} panicked"),
    }
}
