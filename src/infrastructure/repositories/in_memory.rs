use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::{StreamExt, stream};
use tokio::sync::RwLock;

use crate::domain::{
    models::{JobId, Recipient, ScheduledJob},
    repositories::{JobStore, RecipientDirectory, RecipientStream},
};

#[derive(Default)]
pub struct InMemoryRecipientDirectory {
    recipients: Arc<RwLock<Vec<Recipient>>>,
}

impl InMemoryRecipientDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recipients(recipients: Vec<Recipient>) -> Self {
        Self {
            recipients: Arc::new(RwLock::new(recipients)),
        }
    }

    pub async fn register(&self, recipient: Recipient) {
        self.recipients.write().await.push(recipient);
    }
}

impl RecipientDirectory for InMemoryRecipientDirectory {
    fn all_recipients(&self) -> RecipientStream<'_> {
        // Reads one entry per step so registrations made mid-run are still reached.
        let recipients = self.recipients.clone();
        stream::unfold(0usize, move |index| {
            let recipients = recipients.clone();
            async move {
                let next = recipients.read().await.get(index).cloned();
                next.map(|recipient| (Ok(recipient), index + 1))
            }
        })
        .boxed()
    }
}

#[derive(Default)]
pub struct InMemoryJobStore {
    jobs: Arc<RwLock<HashMap<JobId, ScheduledJob>>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_due_time(mut jobs: Vec<ScheduledJob>) -> Vec<ScheduledJob> {
    jobs.sort_by_key(|job| (job.due_time, job.created_at));
    jobs
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn add(&self, job: &ScheduledJob) -> anyhow::Result<()> {
        let mut jobs = self.jobs.write().await;
        if jobs.contains_key(&job.job_id) {
            anyhow::bail!("job {} already exists", job.job_id);
        }
        jobs.insert(job.job_id, job.clone());
        Ok(())
    }

    async fn get(&self, job_id: &JobId) -> anyhow::Result<Option<ScheduledJob>> {
        let jobs = self.jobs.read().await;
        Ok(jobs.get(job_id).cloned())
    }

    async fn remove(&self, job_id: &JobId) -> anyhow::Result<bool> {
        let mut jobs = self.jobs.write().await;
        Ok(jobs.remove(job_id).is_some())
    }

    async fn due_jobs(&self, now: DateTime<Utc>) -> anyhow::Result<Vec<ScheduledJob>> {
        let jobs = self.jobs.read().await;
        Ok(sorted_by_due_time(
            jobs.values()
                .filter(|job| job.due_time <= now)
                .cloned()
                .collect(),
        ))
    }

    async fn pending(&self) -> anyhow::Result<Vec<ScheduledJob>> {
        let jobs = self.jobs.read().await;
        Ok(sorted_by_due_time(jobs.values().cloned().collect()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::domain::{models::TaskDescriptor, value_objects::RecipientId};

    fn job_due_in(offset: Duration) -> ScheduledJob {
        let mut job = ScheduledJob::due_now(TaskDescriptor::broadcast("Hello").unwrap());
        job.due_time = job.due_time + offset;
        job
    }

    #[tokio::test]
    async fn due_jobs_excludes_future_jobs() {
        let store = InMemoryJobStore::new();
        let late = job_due_in(Duration::seconds(-10));
        let now = job_due_in(Duration::zero());
        let future = job_due_in(Duration::hours(1));
        for job in [&now, &future, &late] {
            store.add(job).await.unwrap();
        }

        let due: Vec<JobId> = store
            .due_jobs(Utc::now())
            .await
            .unwrap()
            .into_iter()
            .map(|job| job.job_id)
            .collect();
        assert_eq!(due, vec![late.job_id, now.job_id]);
        assert_eq!(store.pending().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn only_first_remove_claims_the_job() {
        let store = InMemoryJobStore::new();
        let job = job_due_in(Duration::zero());
        store.add(&job).await.unwrap();

        assert!(store.remove(&job.job_id).await.unwrap());
        assert!(!store.remove(&job.job_id).await.unwrap());
        assert!(store.get(&job.job_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn directory_stream_sees_recipients_registered_mid_iteration() {
        let directory = InMemoryRecipientDirectory::with_recipients(vec![Recipient::new(1)]);
        let mut recipients = directory.all_recipients();

        let first = recipients.next().await.unwrap().unwrap();
        directory.register(Recipient::new(2)).await;
        let second = recipients.next().await.unwrap().unwrap();

        assert_eq!(first.recipient_id, RecipientId(1));
        assert_eq!(second.recipient_id, RecipientId(2));
        assert!(recipients.next().await.is_none());
    }
}
