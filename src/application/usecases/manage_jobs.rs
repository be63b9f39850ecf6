use std::sync::Arc;

use crate::{
    application::services::{authorization::Authorizer, scheduler::JobScheduler},
    domain::{
        errors::DomainError,
        models::{JobId, ScheduledJob},
        value_objects::RecipientId,
    },
};

/// Operator view over jobs that have not started yet.
pub struct ManageJobsUseCase {
    authorizer: Arc<dyn Authorizer>,
    scheduler: Arc<dyn JobScheduler>,
}

impl ManageJobsUseCase {
    pub fn new(authorizer: Arc<dyn Authorizer>, scheduler: Arc<dyn JobScheduler>) -> Self {
        Self {
            authorizer,
            scheduler,
        }
    }

    pub async fn list(&self, requester: RecipientId) -> Result<Vec<ScheduledJob>, DomainError> {
        self.ensure_operator(requester)?;
        Ok(self.scheduler.pending_jobs().await?)
    }

    pub async fn cancel(&self, requester: RecipientId, job_id: JobId) -> Result<(), DomainError> {
        self.ensure_operator(requester)?;
        if !self.scheduler.cancel(&job_id).await? {
            return Err(DomainError::NotFound(format!("job {job_id}")));
        }
        Ok(())
    }

    fn ensure_operator(&self, requester: RecipientId) -> Result<(), DomainError> {
        if self.authorizer.is_authorized(requester) {
            Ok(())
        } else {
            Err(DomainError::Forbidden(format!("{requester} may not manage jobs")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::services::{authorization::AdminAllowList, scheduler::StoreBackedScheduler},
        domain::models::TaskDescriptor,
        infrastructure::repositories::in_memory::InMemoryJobStore,
    };

    const OPERATOR: RecipientId = RecipientId(1);

    fn setup() -> (ManageJobsUseCase, Arc<StoreBackedScheduler>) {
        let scheduler = Arc::new(StoreBackedScheduler::new(Arc::new(InMemoryJobStore::new())));
        let usecase =
            ManageJobsUseCase::new(Arc::new(AdminAllowList::new([OPERATOR])), scheduler.clone());
        (usecase, scheduler)
    }

    #[tokio::test]
    async fn operator_cancels_pending_job() {
        let (usecase, scheduler) = setup();
        let handle = scheduler.add_job(TaskDescriptor::broadcast("Hi").unwrap()).await.unwrap();

        assert_eq!(usecase.list(OPERATOR).await.unwrap().len(), 1);
        usecase.cancel(OPERATOR, handle.job_id).await.unwrap();
        assert!(usecase.list(OPERATOR).await.unwrap().is_empty());
        assert!(matches!(
            usecase.cancel(OPERATOR, handle.job_id).await,
            Err(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn non_operator_cannot_see_or_cancel_jobs() {
        let (usecase, scheduler) = setup();
        let handle = scheduler.add_job(TaskDescriptor::broadcast("Hi").unwrap()).await.unwrap();

        assert!(matches!(
            usecase.list(RecipientId(5)).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            usecase.cancel(RecipientId(5), handle.job_id).await,
            Err(DomainError::Forbidden(_))
        ));
        assert_eq!(scheduler.pending_jobs().await.unwrap().len(), 1);
    }
}
