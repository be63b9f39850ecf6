use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::time::{sleep, timeout};
use tokio_stream::StreamExt;
use tracing::{debug, info, warn};

use crate::{
    application::services::delivery::DeliveryChannel,
    domain::{
        models::{BroadcastReport, DeliveryFailure, DeliveryOutcome, validate_message_text},
        repositories::RecipientDirectory,
        value_objects::RecipientId,
    },
};

#[derive(Debug, Clone, Copy)]
pub struct BroadcastConfig {
    /// Pause between two consecutive delivery attempts.
    pub delay: Duration,
    /// Upper bound for a single delivery attempt. `None` waits indefinitely.
    pub delivery_timeout: Option<Duration>,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(500),
            delivery_timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// Sends one message to every recipient in the directory, one at a time.
pub struct BroadcastExecutor {
    directory: Arc<dyn RecipientDirectory>,
    channel: Arc<dyn DeliveryChannel>,
    config: BroadcastConfig,
}

impl BroadcastExecutor {
    pub fn new(
        directory: Arc<dyn RecipientDirectory>,
        channel: Arc<dyn DeliveryChannel>,
        config: BroadcastConfig,
    ) -> Self {
        Self {
            directory,
            channel,
            config,
        }
    }

    /// Runs a full pass over the directory.
    ///
    /// Per-recipient delivery failures are logged and skipped. A malformed
    /// message, a directory read error or an unclassified channel error aborts
    /// the remaining run; recipients already served are not revisited.
    pub async fn execute(&self, message_text: &str) -> anyhow::Result<BroadcastReport> {
        validate_message_text(message_text)?;

        let mut report = BroadcastReport::default();
        let mut recipients = self.directory.all_recipients();

        while let Some(recipient) = recipients.next().await {
            let recipient = recipient.context("failed to read recipient directory")?;

            if report.attempted > 0 {
                sleep(self.config.delay).await;
            }
            report.attempted += 1;

            match self.deliver(recipient.recipient_id, message_text).await? {
                DeliveryOutcome::Delivered => {
                    report.delivered += 1;
                    debug!(recipient = %recipient.recipient_id, "broadcast delivered");
                }
                DeliveryOutcome::Failed(reason) => {
                    report.failed += 1;
                    warn!(
                        recipient = %recipient.recipient_id,
                        %reason,
                        "broadcast delivery failed, skipping recipient"
                    );
                }
            }
        }

        info!(
            attempted = report.attempted,
            delivered = report.delivered,
            failed = report.failed,
            "broadcast finished"
        );
        Ok(report)
    }

    async fn deliver(&self, recipient: RecipientId, text: &str) -> anyhow::Result<DeliveryOutcome> {
        let send = self.channel.send(recipient, text);
        match self.config.delivery_timeout {
            Some(limit) => match timeout(limit, send).await {
                Ok(outcome) => outcome,
                Err(_) => Ok(DeliveryOutcome::Failed(DeliveryFailure::TimedOut(limit))),
            },
            None => send.await,
        }
    }
}
