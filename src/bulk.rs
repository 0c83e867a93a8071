//! Sequential bulk operations.
//!
//! A bulk operation applies one single-record mutation to many identifiers.
//! Items are processed strictly one after another: the mutation for the next
//! id is not started until the current one has resolved. Individual failures
//! (including panics inside the mutation) are recorded and never abort the
//! rest of the batch.

use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

/// Aggregate outcome of one bulk run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BulkOperationResult<Id> {
    pub success_count: usize,
    pub failure_count: usize,
    /// Failed identifiers in processing order.
    pub failed_ids: Vec<Id>,
    /// Set when a cancellation stopped the run before every id was consumed.
    pub cancelled: bool,
}

impl<Id> Default for BulkOperationResult<Id> {
    fn default() -> Self {
        Self {
            success_count: 0,
            failure_count: 0,
            failed_ids: Vec::new(),
            cancelled: false,
        }
    }
}

impl<Id> BulkOperationResult<Id> {
    /// Number of ids that were actually processed.
    pub fn total(&self) -> usize {
        self.success_count + self.failure_count
    }

    pub fn is_complete_success(&self) -> bool {
        self.failure_count == 0 && !self.cancelled
    }
}

/// Progress of a [`BulkCoordinator`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BulkState<Id> {
    Idle,
    /// Waiting on the mutation for `ids[index]`.
    Processing { index: usize },
    Done(BulkOperationResult<Id>),
}

/// Runs a mutation over a selection of ids, one id at a time.
#[derive(Debug)]
pub struct BulkCoordinator<Id> {
    state: BulkState<Id>,
    cancel: Option<CancellationToken>,
}

impl<Id> Default for BulkCoordinator<Id> {
    fn default() -> Self {
        Self {
            state: BulkState::Idle,
            cancel: None,
        }
    }
}

impl<Id> BulkCoordinator<Id>
where
    Id: Clone + Display,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops consuming ids once `token` is cancelled.
    ///
    /// The token is checked before each item starts; an in-flight mutation is
    /// always awaited to completion.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn state(&self) -> &BulkState<Id> {
        &self.state
    }

    /// Applies `op` to every id in `ids`, in order, and tallies the outcome.
    ///
    /// The caller's selection is only borrowed. Duplicate ids are processed
    /// once per occurrence.
    pub async fn run<F, Fut, T, E>(&mut self, ids: &[Id], mut op: F) -> BulkOperationResult<Id>
    where
        F: FnMut(Id) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        self.state = BulkState::Idle;
        let mut result = BulkOperationResult::default();

        for (index, id) in ids.iter().enumerate() {
            if self.is_cancelled() {
                log::warn!(
                    "Bulk operation cancelled after {index} of {} items",
                    ids.len()
                );
                result.cancelled = true;
                break;
            }

            self.state = BulkState::Processing { index };

            match invoke(&mut op, id.clone()).await {
                Ok(()) => result.success_count += 1,
                Err(reason) => {
                    log::error!("Bulk operation failed for {id}: {reason}");
                    result.failure_count += 1;
                    result.failed_ids.push(id.clone());
                }
            }
        }

        log::info!(
            "Bulk operation finished: {} succeeded, {} failed",
            result.success_count,
            result.failure_count
        );

        self.state = BulkState::Done(result.clone());
        result
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}

/// Calls `op` once, turning errors and panics into a failure reason.
async fn invoke<Id, F, Fut, T, E>(op: &mut F, id: Id) -> Result<(), String>
where
    F: FnMut(Id) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let future = std::panic::catch_unwind(AssertUnwindSafe(|| op(id)))
        .map_err(|panic| format!("panicked: {}", panic_message(panic.as_ref())))?;

    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(err)) => Err(err.to_string()),
        Err(panic) => Err(format!("panicked: {}", panic_message(panic.as_ref()))),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}

/// Runs `op` over `ids` with a fresh [`BulkCoordinator`].
pub async fn run_bulk<Id, F, Fut, T, E>(ids: &[Id], op: F) -> BulkOperationResult<Id>
where
    Id: Clone + Display,
    F: FnMut(Id) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    BulkCoordinator::new().run(ids, op).await
}
