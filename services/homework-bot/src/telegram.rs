//! Telegram Bot API notification client

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::TelegramConfig;
use crate::io::HttpClient;
use crate::notifier::Notifier;

/// Envelope every Bot API method answers with
#[derive(Debug, Deserialize)]
struct BotApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends messages to a single Telegram chat
pub struct TelegramNotifier {
    send_message_url: String,
    chat_id: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(
        config: &TelegramConfig,
        bot_token: &str,
        chat_id: &str,
        http: Arc<dyn HttpClient>,
    ) -> Self {
        let base = config.api_base_url.trim_end_matches('/');

        tracing::debug!("Created TelegramNotifier for chat {}", chat_id);

        Self {
            send_message_url: format!("{}/bot{}/sendMessage", base, bot_token),
            chat_id: chat_id.to_string(),
            http,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn notify(&self, text: &str) -> crate::Result<()> {
        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        tracing::debug!("Sending Telegram message to chat {}", self.chat_id);

        let response = self.http.post_json(&self.send_message_url, &body).await?;

        if response.status != 200 {
            return Err(crate::BotError::Notifier(format!(
                "Telegram API returned status {}: {}",
                response.status, response.body
            )));
        }

        if let Ok(reply) = serde_json::from_str::<BotApiReply>(&response.body) {
            if !reply.ok {
                return Err(crate::BotError::Notifier(format!(
                    "Telegram API refused message: {}",
                    reply.description.unwrap_or_default()
                )));
            }
        }

        tracing::debug!("Telegram message delivered");
        Ok(())
    }
}
