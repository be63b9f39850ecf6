use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

use super::broadcast::BroadcastPayload;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct JobId(pub Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Broadcast,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Broadcast => "broadcast",
        }
    }
}

/// Serializable description of deferred work. Survives restarts because it
/// names the task by kind instead of capturing code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    pub kind: TaskKind,
    pub payload: serde_json::Value,
}

impl TaskDescriptor {
    pub fn broadcast(message_text: impl Into<String>) -> serde_json::Result<Self> {
        let payload = BroadcastPayload {
            message_text: message_text.into(),
        };
        Ok(Self {
            kind: TaskKind::Broadcast,
            payload: serde_json::to_value(payload)?,
        })
    }

    pub fn decode<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(self.payload.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledJob {
    pub job_id: JobId,
    pub task: TaskDescriptor,
    pub due_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl ScheduledJob {
    pub fn due_now(task: TaskDescriptor) -> Self {
        let now = Utc::now();
        Self {
            job_id: JobId::new(),
            task,
            due_time: now,
            created_at: now,
        }
    }

    pub fn handle(&self) -> JobHandle {
        JobHandle {
            job_id: self.job_id,
            due_time: self.due_time,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobHandle {
    pub job_id: JobId,
    pub due_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_descriptor_keeps_kind_and_text_through_json() {
        let descriptor = TaskDescriptor::broadcast("Hello").unwrap();
        let json = serde_json::to_string(&descriptor).unwrap();
        assert!(json.contains(r#""kind":"broadcast""#));

        let restored: TaskDescriptor = serde_json::from_str(&json).unwrap();
        let payload: BroadcastPayload = restored.decode().unwrap();
        assert_eq!(restored.kind, TaskKind::Broadcast);
        assert_eq!(payload.message_text, "Hello");
    }
}
