//! Client for the homework review status API

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::io::HttpClient;
use crate::BotError;

/// Source of homework status payloads
#[async_trait]
pub trait HomeworkApi: Send + Sync + std::fmt::Debug {
    /// Fetch every status change since `from_date` (unix seconds)
    async fn fetch(&self, from_date: i64) -> crate::Result<Value>;
}

/// Yandex Practicum homework status client
pub struct PracticumClient {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(config: &ApiConfig, token: &str, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumClient for {}", config.endpoint);

        Self {
            endpoint: config.endpoint.clone(),
            authorization: format!("OAuth {}", token),
            http,
        }
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn fetch(&self, from_date: i64) -> crate::Result<Value> {
        let from_date_param = from_date.to_string();
        tracing::debug!("Requesting {} with from_date={}", self.endpoint, from_date);

        let response = self
            .http
            .get(
                &self.endpoint,
                &[("Authorization", self.authorization.as_str())],
                &[("from_date", from_date_param.as_str())],
            )
            .await
            .map_err(|e| BotError::Transport {
                from_date,
                message: e.to_string(),
            })?;

        // A rejecting server may still answer 200, so markers win over the status
        let decoded = serde_json::from_str::<Value>(&response.body);
        if let Ok(Value::Object(body)) = &decoded {
            if body.contains_key("error") || body.contains_key("code") {
                let code = body
                    .get("code")
                    .map(display_value)
                    .unwrap_or_else(|| "none".to_string());
                let message = body
                    .get("message")
                    .or_else(|| body.get("error"))
                    .map(display_value)
                    .unwrap_or_default();
                tracing::error!("Homework API rejected request: code={} {}", code, message);
                return Err(BotError::ServerReject { code, message });
            }
        }

        if response.status != 200 {
            tracing::error!(
                "Homework API returned status {} for from_date={}",
                response.status,
                from_date
            );
            return Err(BotError::UnexpectedStatus {
                status: response.status,
            });
        }

        let payload = decoded?;
        tracing::debug!("Homework API answered for from_date={}", from_date);
        Ok(payload)
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
