use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use tracing::info;

use crate::{
    application::{
        services::task_registry::TaskHandler, usecases::execute_broadcast::BroadcastExecutor,
    },
    domain::models::{BroadcastPayload, TaskKind},
};

/// Runs stored broadcast jobs.
pub struct BroadcastTaskHandler {
    executor: Arc<BroadcastExecutor>,
}

impl BroadcastTaskHandler {
    pub fn new(executor: Arc<BroadcastExecutor>) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl TaskHandler for BroadcastTaskHandler {
    fn kind(&self) -> TaskKind {
        TaskKind::Broadcast
    }

    async fn handle(&self, payload: serde_json::Value) -> anyhow::Result<()> {
        let payload: BroadcastPayload =
            serde_json::from_value(payload).context("malformed broadcast payload")?;
        let report = self.executor.execute(&payload.message_text).await?;
        info!(
            delivered = report.delivered,
            failed = report.failed,
            "broadcast job completed"
        );
        Ok(())
    }
}
