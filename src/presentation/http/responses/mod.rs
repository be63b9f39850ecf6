use chrono::{DateTime, Utc};
use poem_openapi::Object;
use uuid::Uuid;

#[derive(Object)]
pub struct SubmitBroadcastResponseDto {
    pub job_id: Uuid,
    pub due_time: DateTime<Utc>,
}

#[derive(Object)]
pub struct JobDto {
    pub job_id: Uuid,
    pub kind: String,
    pub message_text: Option<String>,
    pub due_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
