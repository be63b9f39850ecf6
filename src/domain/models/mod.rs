pub mod broadcast;
pub mod delivery;
pub mod job;
pub mod recipient;

pub use broadcast::{
    BroadcastPayload, BroadcastReport, BroadcastRequest, MAX_MESSAGE_CHARS, validate_message_text,
};
pub use delivery::{DeliveryFailure, DeliveryOutcome};
pub use job::{JobHandle, JobId, ScheduledJob, TaskDescriptor, TaskKind};
pub use recipient::Recipient;
