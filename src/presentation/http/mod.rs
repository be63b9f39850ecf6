use std::sync::Arc;

use poem::Route;
use poem_openapi::OpenApiService;

use crate::presentation::http::endpoints::{
    broadcasts::BroadcastEndpoints, health::HealthEndpoints, jobs::JobsEndpoints, root::ApiState,
};

pub mod endpoints;
pub mod errors;
pub mod mappers;
pub mod requests;
pub mod responses;
pub mod security;

/// Operator API under `/api`, Swagger UI at `/`.
pub fn build_app(state: Arc<ApiState>, server_url: &str) -> Route {
    let api_service = OpenApiService::new(
        (
            HealthEndpoints,
            BroadcastEndpoints::new(state.clone()),
            JobsEndpoints::new(state),
        ),
        "Broadcaster API",
        "0.1.0",
    )
    .server(format!("{server_url}/api"));
    let ui = api_service.swagger_ui();
    Route::new().nest("/api", api_service).nest("/", ui)
}
