//! Configuration types for the homework bot

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub polling: PollingConfig,
}

/// Homework review API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// How far back the first poll after startup looks
    #[serde(default = "default_initial_lookback")]
    pub initial_lookback_seconds: i64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            initial_lookback_seconds: default_initial_lookback(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

/// Telegram Bot API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_api_base_url")]
    pub api_base_url: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_telegram_api_base_url(),
        }
    }
}

/// Loop timing and the behavioral policies of the polling cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_polling_interval")]
    pub interval_seconds: u64,
    #[serde(default)]
    pub empty_homeworks: EmptyHomeworksPolicy,
    #[serde(default)]
    pub watermark: WatermarkPolicy,
    #[serde(default)]
    pub records: RecordSelection,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_polling_interval(),
            empty_homeworks: EmptyHomeworksPolicy::default(),
            watermark: WatermarkPolicy::default(),
            records: RecordSelection::default(),
        }
    }
}

/// What an empty `homeworks` list means
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyHomeworksPolicy {
    /// Nothing changed since the watermark; log and move on
    #[default]
    Ignore,
    /// Treat it as a failure and report it to the chat
    Error,
}

/// When the `from_date` watermark moves forward
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatermarkPolicy {
    /// Only to the server's `current_date`, and only after a delivered message
    #[default]
    OnDelivery,
    /// After every processed cycle, to `current_date` or the local clock
    Unconditional,
}

/// Which homework records of a response get translated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSelection {
    /// Only the most recent record (the first in the list)
    #[default]
    First,
    /// Every record, in server order
    All,
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_initial_lookback() -> i64 {
    10_000_000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_telegram_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_polling_interval() -> u64 {
    600
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::BotError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)
        .map_err(|e| crate::BotError::Config(format!("Invalid config file {:?}: {}", path, e)))?;
    Ok(config)
}
