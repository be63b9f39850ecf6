use std::sync::Arc;

use crate::{
    application::{
        handlers::broadcast_task::BroadcastTaskHandler,
        services::{
            authorization::Authorizer,
            delivery::DeliveryChannel,
            scheduler::JobScheduler,
            task_registry::{TaskHandler, TaskRegistry},
        },
        usecases::{
            execute_broadcast::{BroadcastConfig, BroadcastExecutor},
            manage_jobs::ManageJobsUseCase,
            submit_broadcast::SubmitBroadcastUseCase,
        },
    },
    domain::repositories::RecipientDirectory,
};

/// Collaborators shared by the submitting and executing sides of a broadcast.
#[derive(Clone)]
pub struct BroadcastContext {
    pub scheduler: Arc<dyn JobScheduler>,
    pub channel: Arc<dyn DeliveryChannel>,
    pub directory: Arc<dyn RecipientDirectory>,
    pub authorizer: Arc<dyn Authorizer>,
}

impl BroadcastContext {
    pub fn submitter(&self) -> SubmitBroadcastUseCase {
        SubmitBroadcastUseCase::new(self.authorizer.clone(), self.scheduler.clone())
    }

    pub fn job_manager(&self) -> ManageJobsUseCase {
        ManageJobsUseCase::new(self.authorizer.clone(), self.scheduler.clone())
    }

    pub fn executor(&self, config: BroadcastConfig) -> BroadcastExecutor {
        BroadcastExecutor::new(self.directory.clone(), self.channel.clone(), config)
    }

    /// Registry with a handler for every task kind this service schedules.
    pub fn task_registry(&self, config: BroadcastConfig) -> TaskRegistry {
        let broadcast = BroadcastTaskHandler::new(Arc::new(self.executor(config)));
        TaskRegistry::new(vec![Arc::new(broadcast) as Arc<dyn TaskHandler>])
    }
}
