use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{error, info, warn};

use crate::{
    application::services::task_registry::TaskRegistry,
    domain::{models::ScheduledJob, repositories::JobStore},
};

#[derive(Debug, Clone, Copy)]
pub struct WorkerConfig {
    pub poll_interval: Duration,
    /// Jobs found later than this past their due time are dropped instead of run.
    pub misfire_grace: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            misfire_grace: Duration::from_secs(10_000),
        }
    }
}

/// Polls the job store and runs due jobs through the task registry.
pub struct SchedulerWorker {
    store: Arc<dyn JobStore>,
    registry: Arc<TaskRegistry>,
    config: WorkerConfig,
}

impl SchedulerWorker {
    pub fn new(store: Arc<dyn JobStore>, registry: Arc<TaskRegistry>, config: WorkerConfig) -> Self {
        Self {
            store,
            registry,
            config,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move { self.run().await })
    }

    async fn run(self) {
        let mut ticker = interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(err) = self.poll_once().await {
                error!(error = ?err, "scheduler poll failed");
            }
        }
    }

    /// Claims every due job and starts it on its own task.
    ///
    /// A job is claimed by removing it from the store, so it runs at most once
    /// even when several workers share the store.
    pub async fn poll_once(&self) -> anyhow::Result<Vec<JoinHandle<()>>> {
        let now = Utc::now();
        let mut started = Vec::new();

        for job in self.store.due_jobs(now).await? {
            if !self.store.remove(&job.job_id).await? {
                continue;
            }

            let lateness = now.signed_duration_since(job.due_time);
            if lateness
                .to_std()
                .is_ok_and(|late| late > self.config.misfire_grace)
            {
                warn!(
                    job_id = %job.job_id,
                    late_by_secs = lateness.num_seconds(),
                    "job missed its run time, dropping"
                );
                continue;
            }

            started.push(self.start(job));
        }

        Ok(started)
    }

    fn start(&self, job: ScheduledJob) -> JoinHandle<()> {
        let registry = self.registry.clone();
        tokio::spawn(async move {
            let job_id = job.job_id;
            info!(%job_id, kind = job.task.kind.as_str(), "job started");
            if let Err(err) = registry.dispatch(job).await {
                error!(%job_id, error = ?err, "job failed");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::{
        application::services::task_registry::TaskHandler,
        domain::models::{TaskDescriptor, TaskKind},
        infrastructure::repositories::in_memory::InMemoryJobStore,
    };

    #[derive(Default)]
    struct RecordingHandler {
        payloads: Mutex<Vec<serde_json::Value>>,
    }

    #[async_trait]
    impl TaskHandler for RecordingHandler {
        fn kind(&self) -> TaskKind {
            TaskKind::Broadcast
        }

        async fn handle(&self, payload: serde_json::Value) -> anyhow::Result<()> {
            self.payloads.lock().unwrap().push(payload);
            Ok(())
        }
    }

    fn worker(store: Arc<InMemoryJobStore>, handler: Arc<RecordingHandler>) -> SchedulerWorker {
        let registry = TaskRegistry::new(vec![handler as Arc<dyn TaskHandler>]);
        SchedulerWorker::new(store, Arc::new(registry), WorkerConfig::default())
    }

    async fn finish(handles: Vec<JoinHandle<()>>) -> usize {
        let count = handles.len();
        for handle in handles {
            handle.await.unwrap();
        }
        count
    }

    #[tokio::test]
    async fn due_job_runs_once_and_is_consumed() {
        let store = Arc::new(InMemoryJobStore::new());
        let handler = Arc::new(RecordingHandler::default());
        let worker = worker(store.clone(), handler.clone());

        let job = ScheduledJob::due_now(TaskDescriptor::broadcast("Hello").unwrap());
        store.add(&job).await.unwrap();

        assert_eq!(finish(worker.poll_once().await.unwrap()).await, 1);
        assert_eq!(finish(worker.poll_once().await.unwrap()).await, 0);
        assert_eq!(handler.payloads.lock().unwrap().len(), 1);
        assert!(store.get(&job.job_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn future_job_stays_pending() {
        let store = Arc::new(InMemoryJobStore::new());
        let handler = Arc::new(RecordingHandler::default());
        let worker = worker(store.clone(), handler.clone());

        let mut job = ScheduledJob::due_now(TaskDescriptor::broadcast("Later").unwrap());
        job.due_time = job.due_time + chrono::Duration::hours(1);
        store.add(&job).await.unwrap();

        assert_eq!(finish(worker.poll_once().await.unwrap()).await, 0);
        assert!(store.get(&job.job_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn job_past_misfire_grace_is_dropped() {
        let store = Arc::new(InMemoryJobStore::new());
        let handler = Arc::new(RecordingHandler::default());
        let worker = worker(store.clone(), handler.clone());

        let mut job = ScheduledJob::due_now(TaskDescriptor::broadcast("Stale").unwrap());
        job.due_time = job.due_time - chrono::Duration::seconds(20_000);
        store.add(&job).await.unwrap();

        assert_eq!(finish(worker.poll_once().await.unwrap()).await, 0);
        assert!(handler.payloads.lock().unwrap().is_empty());
        assert!(store.get(&job.job_id).await.unwrap().is_none());
    }
}
