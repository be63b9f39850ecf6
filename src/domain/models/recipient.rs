use serde::{Deserialize, Serialize};

use crate::domain::value_objects::RecipientId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub recipient_id: RecipientId,
}

impl Recipient {
    pub fn new(recipient_id: i64) -> Self {
        Self {
            recipient_id: RecipientId(recipient_id),
        }
    }
}
