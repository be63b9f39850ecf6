use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;

use crate::domain::models::{JobId, Recipient, ScheduledJob};

pub type RecipientStream<'a> = BoxStream<'a, anyhow::Result<Recipient>>;

/// Read-only view of every registered recipient.
pub trait RecipientDirectory: Send + Sync {
    /// Lazily streams recipients in the directory's natural order. Each call
    /// reads the directory afresh.
    fn all_recipients(&self) -> RecipientStream<'_>;
}

/// Durable storage for jobs that have not run yet.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn add(&self, job: &ScheduledJob) -> anyhow::Result<()>;

    async fn get(&self, job_id: &JobId) -> anyhow::Result<Option<ScheduledJob>>;

    /// Deletes the job. Returns `true` only for the caller that actually removed
    /// it, which makes removal usable as a claim.
    async fn remove(&self, job_id: &JobId) -> anyhow::Result<bool>;

    /// Jobs whose due time is at or before `now`, earliest first.
    async fn due_jobs(&self, now: DateTime<Utc>) -> anyhow::Result<Vec<ScheduledJob>>;

    /// Every stored job, earliest first.
    async fn pending(&self) -> anyhow::Result<Vec<ScheduledJob>>;
}
