use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::models::{ScheduledJob, TaskKind};

#[async_trait]
pub trait TaskHandler: Send + Sync {
    fn kind(&self) -> TaskKind;
    async fn handle(&self, payload: serde_json::Value) -> anyhow::Result<()>;
}

/// Routes stored jobs to the handler registered for their task kind.
#[derive(Clone, Default)]
pub struct TaskRegistry {
    handlers: HashMap<TaskKind, Arc<dyn TaskHandler>>,
}

impl TaskRegistry {
    pub fn new(handlers: Vec<Arc<dyn TaskHandler>>) -> Self {
        let mut map = HashMap::new();
        for handler in handlers {
            map.insert(handler.kind(), handler);
        }
        Self { handlers: map }
    }

    pub fn get(&self, kind: TaskKind) -> Option<Arc<dyn TaskHandler>> {
        self.handlers.get(&kind).cloned()
    }

    pub async fn dispatch(&self, job: ScheduledJob) -> anyhow::Result<()> {
        let handler = self.get(job.task.kind).ok_or_else(|| {
            anyhow::anyhow!(
                "no handler registered for task kind {}",
                job.task.kind.as_str()
            )
        })?;
        handler.handle(job.task.payload).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::domain::models::TaskDescriptor;

    #[derive(Default)]
    struct RecordingHandler {
        payloads: Mutex<Vec<serde_json::Value>>,
    }

    #[async_trait]
    impl TaskHandler for RecordingHandler {
        fn kind(&self) -> TaskKind {
            TaskKind::Broadcast
        }

        async fn handle(&self, payload: serde_json::Value) -> anyhow::Result<()> {
            self.payloads.lock().unwrap().push(payload);
            Ok(())
        }
    }

    #[tokio::test]
    async fn dispatches_payload_to_handler_of_matching_kind() {
        let handler = Arc::new(RecordingHandler::default());
        let registry = TaskRegistry::new(vec![handler.clone() as Arc<dyn TaskHandler>]);

        let job = ScheduledJob::due_now(TaskDescriptor::broadcast("Hello").unwrap());
        registry.dispatch(job).await.unwrap();

        let payloads = handler.payloads.lock().unwrap();
        assert_eq!(payloads.as_slice(), &[serde_json::json!({ "message_text": "Hello" })]);
    }

    #[tokio::test]
    async fn unknown_kind_is_an_error() {
        let registry = TaskRegistry::default();
        let job = ScheduledJob::due_now(TaskDescriptor::broadcast("Hello").unwrap());
        assert!(registry.dispatch(job).await.is_err());
    }
}
