use serde::{Deserialize, Serialize};

use crate::domain::{errors::DomainError, value_objects::RecipientId};

/// Upper bound on a single outbound text message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 4096;

#[derive(Debug, Clone)]
pub struct BroadcastRequest {
    pub message_text: String,
    pub requested_by: RecipientId,
}

/// Payload stored with a broadcast job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastPayload {
    pub message_text: String,
}

pub fn validate_message_text(text: &str) -> Result<(), DomainError> {
    if text.trim().is_empty() {
        return Err(DomainError::Validation(
            "broadcast text must not be empty".to_string(),
        ));
    }
    let chars = text.chars().count();
    if chars > MAX_MESSAGE_CHARS {
        return Err(DomainError::Validation(format!(
            "broadcast text is {chars} characters, limit is {MAX_MESSAGE_CHARS}"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastReport {
    pub attempted: u64,
    pub delivered: u64,
    pub failed: u64,
}
