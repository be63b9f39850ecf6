use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    application::services::delivery::DeliveryChannel,
    domain::{
        models::{DeliveryFailure, DeliveryOutcome},
        value_objects::RecipientId,
    },
};

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

pub struct TelegramChannel {
    http: Client,
    base_url: String,
    bot_token: String,
}

impl TelegramChannel {
    pub fn new(
        base_url: impl Into<String>,
        bot_token: impl Into<String>,
    ) -> anyhow::Result<Arc<dyn DeliveryChannel>> {
        let http = Client::builder()
            .user_agent("broadcaster/telegram")
            .build()
            .context("failed to build telegram client")?;
        Ok(Arc::new(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bot_token: bot_token.into(),
        }) as Arc<dyn DeliveryChannel>)
    }

    fn build_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.bot_token, method)
    }
}

#[async_trait]
impl DeliveryChannel for TelegramChannel {
    async fn send(&self, recipient: RecipientId, text: &str) -> anyhow::Result<DeliveryOutcome> {
        let request = SendMessageRequest {
            chat_id: recipient.as_i64(),
            text,
            parse_mode: "HTML",
        };
        let response = match self
            .http
            .post(self.build_url("sendMessage"))
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                return Ok(DeliveryOutcome::Failed(DeliveryFailure::Unreachable(
                    err.without_url().to_string(),
                )));
            }
        };

        match response.json::<TelegramResponse>().await {
            Ok(payload) => classify(payload),
            Err(err) => Ok(DeliveryOutcome::Failed(DeliveryFailure::Unreachable(
                format!("unreadable response: {}", err.without_url()),
            ))),
        }
    }
}

/// Maps a Bot API reply to a delivery outcome.
///
/// Errors that would repeat for every recipient (bad token, unparsable
/// message) are returned as `Err` so the broadcast stops early.
fn classify(payload: TelegramResponse) -> anyhow::Result<DeliveryOutcome> {
    if payload.ok {
        return Ok(DeliveryOutcome::Delivered);
    }

    let description = payload
        .description
        .unwrap_or_else(|| "unknown error".to_string());
    let lowered = description.to_lowercase();
    let code = payload.error_code.unwrap_or_default();

    let failure = match code {
        401 | 404 => anyhow::bail!("telegram rejected the bot token ({code}): {description}"),
        400 if is_malformed_message(&lowered) => {
            anyhow::bail!("telegram rejected the message: {description}")
        }
        400 if lowered.contains("chat not found") => DeliveryFailure::ChatNotFound,
        403 if lowered.contains("blocked") => DeliveryFailure::Blocked,
        403 if lowered.contains("deactivated") => DeliveryFailure::Deactivated,
        429 => DeliveryFailure::RateLimited {
            retry_after: payload
                .parameters
                .and_then(|p| p.retry_after)
                .map(Duration::from_secs),
        },
        _ => DeliveryFailure::Rejected(format!("{code}: {description}")),
    };
    Ok(DeliveryOutcome::Failed(failure))
}

fn is_malformed_message(description: &str) -> bool {
    description.contains("can't parse entities")
        || description.contains("message is too long")
        || description.contains("message text is empty")
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'static str,
}

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    description: Option<String>,
    error_code: Option<u16>,
    parameters: Option<ResponseParameters>,
}

#[derive(Debug, Deserialize)]
struct ResponseParameters {
    retry_after: Option<u64>,
}
