use std::sync::Arc;

use poem::Result as PoemResult;
use poem_openapi::{OpenApi, payload::Json};

use crate::{
    domain::models::BroadcastRequest,
    presentation::http::{
        endpoints::root::{ApiState, EndpointsTags},
        errors::domain_error,
        requests::SubmitBroadcastRequestDto,
        responses::SubmitBroadcastResponseDto,
        security::JwtAuth,
    },
};

#[derive(Clone)]
pub struct BroadcastEndpoints {
    state: Arc<ApiState>,
}

impl BroadcastEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl BroadcastEndpoints {
    /// Queue a message for every registered recipient. Returns once the job is stored.
    #[oai(path = "/broadcasts", method = "post", tag = EndpointsTags::Broadcasts)]
    pub async fn submit_broadcast(
        &self,
        auth: JwtAuth,
        request: Json<SubmitBroadcastRequestDto>,
    ) -> PoemResult<Json<SubmitBroadcastResponseDto>> {
        let operator = auth.into_operator(&self.state.jwt)?;

        let handle = self
            .state
            .submit_broadcast_usecase
            .execute(BroadcastRequest {
                message_text: request.0.text,
                requested_by: operator.operator,
            })
            .await
            .map_err(domain_error)?;

        Ok(Json(SubmitBroadcastResponseDto {
            job_id: handle.job_id.0,
            due_time: handle.due_time,
        }))
    }
}
