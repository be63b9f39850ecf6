use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::{
    models::{JobHandle, JobId, ScheduledJob, TaskDescriptor},
    repositories::JobStore,
};

#[async_trait]
pub trait JobScheduler: Send + Sync {
    /// Durably records `task` for execution as soon as possible.
    async fn add_job(&self, task: TaskDescriptor) -> anyhow::Result<JobHandle>;

    /// Removes a job that has not started yet. Returns `false` when no such
    /// job is pending.
    async fn cancel(&self, job_id: &JobId) -> anyhow::Result<bool>;

    async fn pending_jobs(&self) -> anyhow::Result<Vec<ScheduledJob>>;
}

/// Scheduler front end over a [`JobStore`]; execution is left to the worker
/// polling the same store.
#[derive(Clone)]
pub struct StoreBackedScheduler {
    store: Arc<dyn JobStore>,
}

impl StoreBackedScheduler {
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl JobScheduler for StoreBackedScheduler {
    async fn add_job(&self, task: TaskDescriptor) -> anyhow::Result<JobHandle> {
        let job = ScheduledJob::due_now(task);
        self.store.add(&job).await?;
        info!(job_id = %job.job_id, kind = job.task.kind.as_str(), "job scheduled");
        Ok(job.handle())
    }

    async fn cancel(&self, job_id: &JobId) -> anyhow::Result<bool> {
        let removed = self.store.remove(job_id).await?;
        if removed {
            info!(%job_id, "job cancelled");
        }
        Ok(removed)
    }

    async fn pending_jobs(&self) -> anyhow::Result<Vec<ScheduledJob>> {
        self.store.pending().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::in_memory::InMemoryJobStore;

    #[tokio::test]
    async fn added_job_is_pending_until_cancelled() {
        let store = Arc::new(InMemoryJobStore::new());
        let scheduler = StoreBackedScheduler::new(store.clone());

        let handle = scheduler
            .add_job(TaskDescriptor::broadcast("Hello").unwrap())
            .await
            .unwrap();

        let pending = scheduler.pending_jobs().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].job_id, handle.job_id);
        assert_eq!(pending[0].task, TaskDescriptor::broadcast("Hello").unwrap());

        assert!(scheduler.cancel(&handle.job_id).await.unwrap());
        assert!(!scheduler.cancel(&handle.job_id).await.unwrap());
        assert!(scheduler.pending_jobs().await.unwrap().is_empty());
    }
}
