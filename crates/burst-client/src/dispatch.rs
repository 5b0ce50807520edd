//! Concurrent fan-out of identical requests

use crate::{
    BurstConfig, ClientError, DispatchError, FailurePolicy, ObjectStore, Operation, S3Store,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

/// Counts reported once every invocation has been accounted for
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// SDK operation name
    pub operation: &'static str,
    /// Invocations dispatched
    pub requested: usize,
    /// Invocations that completed successfully
    pub succeeded: usize,
    /// Invocations that failed (only non-zero under [`FailurePolicy::Collect`])
    pub failed: usize,
    /// Wall time from first dispatch to the last completion
    pub elapsed: Duration,
}

impl RunSummary {
    /// Whether every dispatched invocation succeeded
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.succeeded == self.requested
    }
}

/// Launches N unordered invocations of one operation against a shared store
pub struct Dispatcher<S: ?Sized> {
    store: Arc<S>,
    policy: FailurePolicy,
}

impl<S> Dispatcher<S>
where
    S: ObjectStore + ?Sized + 'static,
{
    /// Create a fail-fast dispatcher over a shared store
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            policy: FailurePolicy::default(),
        }
    }

    /// Set the failure policy
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run `requests` concurrent invocations of `operation`.
    ///
    /// Under [`FailurePolicy::FailFast`] the first failure is returned as soon as it
    /// is observed. Sibling tasks are detached rather than aborted and keep running
    /// until the runtime shuts down.
    pub async fn run(
        &self,
        operation: Operation,
        requests: usize,
    ) -> Result<RunSummary, DispatchError> {
        let operation = Arc::new(operation);
        let name = operation.name();
        let started = Instant::now();

        info!(operation = %operation, requests, "Dispatching requests");

        let mut tasks = JoinSet::new();
        let mut indices = HashMap::with_capacity(requests);
        for index in 0..requests {
            let store = Arc::clone(&self.store);
            let operation = Arc::clone(&operation);
            let handle = tasks.spawn(async move {
                let result = invoke(store.as_ref(), &operation, index).await;
                (index, result)
            });
            indices.insert(handle.id(), index);
        }

        let mut succeeded = 0;
        let mut failed = 0;
        while let Some(joined) = tasks.join_next_with_id().await {
            let failure = match joined {
                Ok((_, (_, Ok(())))) => {
                    succeeded += 1;
                    continue;
                }
                Ok((_, (index, Err(source)))) => DispatchError::Invocation {
                    index,
                    operation: name,
                    source,
                },
                Err(e) => DispatchError::Panicked {
                    index: indices.get(&e.id()).copied().unwrap_or_default(),
                },
            };

            match self.policy {
                FailurePolicy::FailFast => {
                    tasks.detach_all();
                    return Err(failure);
                }
                FailurePolicy::Collect => {
                    failed += 1;
                    error!(error = %failure, "Request failed");
                }
            }
        }

        let summary = RunSummary {
            operation: name,
            requested: requests,
            succeeded,
            failed,
            elapsed: started.elapsed(),
        };
        info!(
            operation = name,
            requested = summary.requested,
            succeeded = summary.succeeded,
            failed = summary.failed,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Run complete"
        );
        Ok(summary)
    }
}

async fn invoke<S>(store: &S, operation: &Operation, index: usize) -> Result<(), ClientError>
where
    S: ObjectStore + ?Sized,
{
    match operation {
        Operation::ListBuckets => {
            let buckets = store.list_buckets().await?;
            info!(index, operation = "ListBuckets", buckets, "Listed buckets #{index} successful");
        }
        Operation::GetObject { bucket, key } => {
            let drained = store.get_object(bucket, key).await?;
            if !drained.complete {
                warn!(index, bytes = drained.bytes, "Object body #{index} was truncated");
            }
            info!(
                index,
                operation = "GetObject",
                bytes = drained.bytes,
                "Fetched an object #{index} successful"
            );
        }
    }
    Ok(())
}

/// Build one client from `config`, then dispatch the selected operation.
pub async fn run(config: &BurstConfig) -> Result<RunSummary, DispatchError> {
    config.validate()?;
    let store = S3Store::connect(&config.client).await?;

    Dispatcher::new(Arc::new(store))
        .with_policy(config.failure_policy)
        .run(config.operation(), config.requests)
        .await
}
