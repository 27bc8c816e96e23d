//! Bulk task operations built from single-item calls.
//!
//! A batch never aborts on a failed item: every item is attempted and the
//! outcome lists what succeeded and what failed, each in input order.

use std::future::Future;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use serde_json::Value;

use super::clickup::types::{CreateTaskData, UpdateTaskItem};
use super::clickup::{Gateway, task};
use super::error::{ClickUpError, Result};

/// Successes and failures of one batch, in input order.
#[derive(Debug)]
pub struct BatchOutcome<I, T> {
    pub succeeded: Vec<T>,
    pub failed: Vec<(I, ClickUpError)>,
}

impl<I, T> BatchOutcome<I, T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<I, T> Default for BatchOutcome<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Strategy for applying one operation over many items.
///
/// Runs are `Send`, so a batch can be driven from a spawned task.
#[async_trait]
pub trait BatchRunner: Send + Sync {
    async fn run<I, T, F, Fut>(&self, items: Vec<I>, op: F) -> BatchOutcome<I, T>
    where
        I: Clone + Send,
        T: Send,
        F: FnMut(I) -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send;
}

/// Runs items one after another, in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

#[async_trait]
impl BatchRunner for Sequential {
    async fn run<I, T, F, Fut>(&self, items: Vec<I>, mut op: F) -> BatchOutcome<I, T>
    where
        I: Clone + Send,
        T: Send,
        F: FnMut(I) -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send,
    {
        stream::iter(items.into_iter().enumerate())
            .fold(BatchOutcome::new(), |mut outcome, (index, item)| {
                let pending = op(item.clone());
                async move {
                    match pending.await {
                        Ok(value) => outcome.succeeded.push(value),
                        Err(e) => {
                            tracing::warn!(index, error = %e, "batch item failed");
                            outcome.failed.push((item, e));
                        }
                    }
                    outcome
                }
            })
            .await
    }
}

/// Serializable summary of a bulk call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkReport<T, F> {
    pub succeeded: Vec<T>,
    pub failed: Vec<F>,
}

/// A failed create or update, with the payload that was submitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDataFailure<D> {
    pub task_data: D,
    pub error: String,
}

/// A failed delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskIdFailure {
    pub task_id: String,
    pub error: String,
}

pub type BulkCreateReport = BulkReport<Value, TaskDataFailure<CreateTaskData>>;
pub type BulkUpdateReport = BulkReport<Value, TaskDataFailure<UpdateTaskItem>>;
pub type BulkDeleteReport = BulkReport<String, TaskIdFailure>;

/// Bulk task operations against one gateway.
pub struct TaskBatch<'a, G: ?Sized, R = Sequential> {
    gateway: &'a G,
    runner: R,
}

impl<'a, G: Gateway + ?Sized> TaskBatch<'a, G> {
    /// Batch with the default sequential runner.
    pub const fn new(gateway: &'a G) -> Self {
        Self {
            gateway,
            runner: Sequential,
        }
    }
}

impl<'a, G: Gateway + ?Sized, R: BatchRunner> TaskBatch<'a, G, R> {
    /// Batch with a custom runner.
    pub const fn with_runner(gateway: &'a G, runner: R) -> Self {
        Self { gateway, runner }
    }

    /// Create every task in `list_id`.
    pub async fn create(&self, list_id: &str, items: Vec<CreateTaskData>) -> BulkCreateReport {
        let gateway = self.gateway;
        let outcome = self
            .runner
            .run(items, |data: CreateTaskData| async move {
                task::create_task(gateway, list_id, &data).await
            })
            .await;

        BulkReport {
            succeeded: outcome.succeeded,
            failed: outcome
                .failed
                .into_iter()
                .map(|(task_data, e)| TaskDataFailure {
                    task_data,
                    error: e.to_string(),
                })
                .collect(),
        }
    }

    /// Apply each update to the task it names.
    ///
    /// Items without a `taskId` fail without a request being made. Supplied
    /// dates get their time flags defaulted as for single updates.
    pub async fn update(&self, items: Vec<UpdateTaskItem>) -> BulkUpdateReport {
        let gateway = self.gateway;
        let outcome = self
            .runner
            .run(items, |item: UpdateTaskItem| async move {
                let task_id = item
                    .task_id
                    .filter(|id| !id.is_empty())
                    .ok_or(ClickUpError::MissingIdentifier("taskId"))?;
                let params = item.params.with_time_flags();
                task::update_task(gateway, &task_id, &params, None).await
            })
            .await;

        BulkReport {
            succeeded: outcome.succeeded,
            failed: outcome
                .failed
                .into_iter()
                .map(|(task_data, e)| TaskDataFailure {
                    task_data,
                    error: e.to_string(),
                })
                .collect(),
        }
    }

    /// Delete every task id, reporting the ids that were removed.
    pub async fn delete(&self, task_ids: Vec<String>) -> BulkDeleteReport {
        let gateway = self.gateway;
        let outcome = self
            .runner
            .run(task_ids, |task_id: String| async move {
                task::delete_task(gateway, &task_id).await.map(|_| task_id)
            })
            .await;

        BulkReport {
            succeeded: outcome.succeeded,
            failed: outcome
                .failed
                .into_iter()
                .map(|(task_id, e)| TaskIdFailure {
                    task_id,
                    error: e.to_string(),
                })
                .collect(),
        }
    }
}

/// Create many tasks in one list, sequentially.
pub async fn bulk_create_tasks<G: Gateway + ?Sized>(
    gateway: &G,
    list_id: &str,
    items: Vec<CreateTaskData>,
) -> BulkCreateReport {
    TaskBatch::new(gateway).create(list_id, items).await
}

/// Update many tasks, sequentially.
pub async fn bulk_update_tasks<G: Gateway + ?Sized>(
    gateway: &G,
    items: Vec<UpdateTaskItem>,
) -> BulkUpdateReport {
    TaskBatch::new(gateway).update(items).await
}

/// Delete many tasks, sequentially.
pub async fn bulk_delete_tasks<G: Gateway + ?Sized>(
    gateway: &G,
    task_ids: Vec<String>,
) -> BulkDeleteReport {
    TaskBatch::new(gateway).delete(task_ids).await
}
