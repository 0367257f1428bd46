//! Required secrets, read from the environment at startup

use crate::{BotError, Result};

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Every variable the bot refuses to start without, in reporting order
pub const REQUIRED_VARIABLES: [&str; 3] = [PRACTICUM_TOKEN, TELEGRAM_TOKEN, TELEGRAM_CHAT_ID];

/// Secrets needed to talk to the homework API and to Telegram
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

impl Credentials {
    /// Read credentials from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through `lookup`, failing with the full list of
    /// missing names if any value is absent or blank
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let missing = missing_variables(&lookup);
        if !missing.is_empty() {
            tracing::error!(
                "CRITICAL: missing required environment variables: {}. Bot stopped.",
                missing.join(", ")
            );
            return Err(BotError::ConfigMissing(
                missing.into_iter().map(str::to_string).collect(),
            ));
        }

        let value = |name: &str| lookup(name).map(|v| v.trim().to_string()).unwrap_or_default();
        tracing::debug!("All required environment variables are present");
        Ok(Self {
            practicum_token: value(PRACTICUM_TOKEN),
            telegram_token: value(TELEGRAM_TOKEN),
            telegram_chat_id: value(TELEGRAM_CHAT_ID),
        })
    }
}

/// Names of required variables that are absent or blank
pub fn missing_variables<F>(lookup: F) -> Vec<&'static str>
where
    F: Fn(&str) -> Option<String>,
{
    REQUIRED_VARIABLES
        .iter()
        .copied()
        .filter(|name| {
            lookup(*name)
                .map(|value| value.trim().is_empty())
                .unwrap_or(true)
        })
        .collect()
}

/// Whether every required variable is present
pub fn check_tokens<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    missing_variables(lookup).is_empty()
}
