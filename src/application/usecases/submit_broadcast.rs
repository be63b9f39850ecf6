use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    application::services::{authorization::Authorizer, scheduler::JobScheduler},
    domain::{
        errors::DomainError,
        models::{BroadcastRequest, JobHandle, TaskDescriptor, validate_message_text},
    },
};

pub struct SubmitBroadcastUseCase {
    authorizer: Arc<dyn Authorizer>,
    scheduler: Arc<dyn JobScheduler>,
}

impl SubmitBroadcastUseCase {
    pub fn new(authorizer: Arc<dyn Authorizer>, scheduler: Arc<dyn JobScheduler>) -> Self {
        Self {
            authorizer,
            scheduler,
        }
    }

    /// Queues a broadcast and returns as soon as the job is durably stored.
    pub async fn execute(&self, request: BroadcastRequest) -> Result<JobHandle, DomainError> {
        if !self.authorizer.is_authorized(request.requested_by) {
            warn!(requester = %request.requested_by, "broadcast refused: not an operator");
            return Err(DomainError::Forbidden(format!(
                "{} may not broadcast",
                request.requested_by
            )));
        }

        validate_message_text(&request.message_text)?;

        let task = TaskDescriptor::broadcast(request.message_text).map_err(anyhow::Error::from)?;
        let handle = self.scheduler.add_job(task).await?;

        info!(
            job_id = %handle.job_id,
            requester = %request.requested_by,
            "broadcast submitted"
        );
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::{
        application::services::{authorization::AdminAllowList, scheduler::StoreBackedScheduler},
        domain::{
            models::{BroadcastPayload, JobId, ScheduledJob, TaskKind},
            repositories::JobStore,
            value_objects::RecipientId,
        },
        infrastructure::repositories::in_memory::InMemoryJobStore,
    };

    const OPERATOR: RecipientId = RecipientId(1);

    fn usecase(store: Arc<dyn JobStore>) -> SubmitBroadcastUseCase {
        SubmitBroadcastUseCase::new(
            Arc::new(AdminAllowList::new([OPERATOR])),
            Arc::new(StoreBackedScheduler::new(store)),
        )
    }

    fn request(text: &str, requested_by: RecipientId) -> BroadcastRequest {
        BroadcastRequest {
            message_text: text.to_string(),
            requested_by,
        }
    }

    #[tokio::test]
    async fn operator_submission_records_one_broadcast_job() {
        let store = Arc::new(InMemoryJobStore::new());
        let handle = usecase(store.clone())
            .execute(request("Hello", OPERATOR))
            .await
            .unwrap();

        let pending = store.pending().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].job_id, handle.job_id);
        assert_eq!(pending[0].task.kind, TaskKind::Broadcast);
        let payload: BroadcastPayload = pending[0].task.decode().unwrap();
        assert_eq!(payload.message_text, "Hello");
    }

    #[tokio::test]
    async fn unauthorized_requester_creates_no_job() {
        let store = Arc::new(InMemoryJobStore::new());
        let result = usecase(store.clone())
            .execute(request("Hello", RecipientId(99)))
            .await;

        assert!(matches!(result, Err(DomainError::Forbidden(_))));
        assert!(store.pending().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_text_creates_no_job() {
        let store = Arc::new(InMemoryJobStore::new());
        let result = usecase(store.clone()).execute(request(" ", OPERATOR)).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(store.pending().await.unwrap().is_empty());
    }

    struct UnavailableStore;

    #[async_trait]
    impl JobStore for UnavailableStore {
        async fn add(&self, _job: &ScheduledJob) -> anyhow::Result<()> {
            anyhow::bail!("connection refused")
        }

        async fn get(&self, _job_id: &JobId) -> anyhow::Result<Option<ScheduledJob>> {
            anyhow::bail!("connection refused")
        }

        async fn remove(&self, _job_id: &JobId) -> anyhow::Result<bool> {
            anyhow::bail!("connection refused")
        }

        async fn due_jobs(&self, _now: DateTime<Utc>) -> anyhow::Result<Vec<ScheduledJob>> {
            anyhow::bail!("connection refused")
        }

        async fn pending(&self) -> anyhow::Result<Vec<ScheduledJob>> {
            anyhow::bail!("connection refused")
        }
    }

    #[tokio::test]
    async fn store_failure_surfaces_to_submitter() {
        let result = usecase(Arc::new(UnavailableStore))
            .execute(request("Hello", OPERATOR))
            .await;

        assert!(matches!(result, Err(DomainError::Other(_))));
    }
}
