use std::time::Duration;

use thiserror::Error;

/// Result of a single delivery attempt as reported by a delivery channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    Failed(DeliveryFailure),
}

/// Channel-level reasons a recipient could not be reached. These never abort a broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryFailure {
    #[error("recipient blocked the sender")]
    Blocked,
    #[error("recipient account is deactivated")]
    Deactivated,
    #[error("chat not found")]
    ChatNotFound,
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },
    #[error("channel unreachable: {0}")]
    Unreachable(String),
    #[error("delivery timed out after {0:?}")]
    TimedOut(Duration),
    #[error("rejected by channel: {0}")]
    Rejected(String),
}
