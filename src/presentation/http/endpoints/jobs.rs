use std::sync::Arc;

use poem::Result as PoemResult;
use poem_openapi::{OpenApi, param::Path, payload::Json};
use uuid::Uuid;

use crate::{
    domain::models::JobId,
    presentation::http::{
        endpoints::root::{ApiState, EndpointsTags},
        errors::domain_error,
        mappers::map_job,
        responses::JobDto,
        security::JwtAuth,
    },
};

#[derive(Clone)]
pub struct JobsEndpoints {
    state: Arc<ApiState>,
}

impl JobsEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl JobsEndpoints {
    #[oai(path = "/jobs", method = "get", tag = EndpointsTags::Jobs)]
    pub async fn list_jobs(&self, auth: JwtAuth) -> PoemResult<Json<Vec<JobDto>>> {
        let operator = auth.into_operator(&self.state.jwt)?;

        let jobs = self
            .state
            .manage_jobs_usecase
            .list(operator.operator)
            .await
            .map_err(domain_error)?;

        Ok(Json(jobs.iter().map(map_job).collect()))
    }

    /// Cancel a job that has not started yet.
    #[oai(path = "/jobs/:job_id", method = "delete", tag = EndpointsTags::Jobs)]
    pub async fn cancel_job(&self, auth: JwtAuth, job_id: Path<Uuid>) -> PoemResult<()> {
        let operator = auth.into_operator(&self.state.jwt)?;

        self.state
            .manage_jobs_usecase
            .cancel(operator.operator, JobId(job_id.0))
            .await
            .map_err(domain_error)
    }
}
