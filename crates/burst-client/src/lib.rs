//! # burst-client
//!
//! Fires a configurable number of concurrent requests at an S3-compatible
//! endpoint and reports each outcome.
//!
//! A run builds exactly one client from static credentials and an optional
//! endpoint override, then launches N unordered invocations of either
//! `ListBuckets` or `GetObject`. Object bodies are drained and discarded.
//! There are no retries.
//!
//! ## Example
//!
//! ```rust,ignore
//! use burst_client::{BurstConfig, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ClientConfig::new("access", "secret")
//!         .with_endpoint("http://localhost:9000")
//!         .with_region("us-east-1");
//!
//!     let config = BurstConfig::new(client)
//!         .with_object("test", "file.txt")
//!         .with_requests(3);
//!
//!     let summary = burst_client::run(&config).await?;
//!     println!("{} of {} succeeded", summary.succeeded, summary.requested);
//!     Ok(())
//! }
//! ```

mod config;
mod dispatch;
mod error;
mod operation;
mod store;

pub use config::{BurstConfig, ClientConfig, FailurePolicy};
pub use dispatch::{run, Dispatcher, RunSummary};
pub use error::{ClientError, DispatchError, Result};
pub use operation::Operation;
pub use store::{DrainedObject, ObjectStore, S3Store};
