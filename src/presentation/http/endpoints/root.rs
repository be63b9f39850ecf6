use std::sync::Arc;

use poem_openapi::Tags;

use crate::application::{
    services::jwt::JwtService,
    usecases::{manage_jobs::ManageJobsUseCase, submit_broadcast::SubmitBroadcastUseCase},
};

#[derive(Clone)]
pub struct ApiState {
    pub submit_broadcast_usecase: Arc<SubmitBroadcastUseCase>,
    pub manage_jobs_usecase: Arc<ManageJobsUseCase>,
    pub jwt: JwtService,
}

/// Enum of API sections (tags)
#[derive(Tags)]
pub enum EndpointsTags {
    Health,
    Broadcasts,
    Jobs,
}
