use async_trait::async_trait;

use crate::domain::{models::DeliveryOutcome, value_objects::RecipientId};

/// Outbound channel that delivers a text to one recipient.
///
/// Channel-level problems (blocked, unreachable, rate limited) come back as
/// `Ok(DeliveryOutcome::Failed(..))`. `Err` is reserved for faults that should
/// stop a broadcast altogether.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    async fn send(&self, recipient: RecipientId, text: &str) -> anyhow::Result<DeliveryOutcome>;
}
