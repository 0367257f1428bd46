//! Error types for the homework bot

/// Errors that can occur while polling and notifying
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    ConfigMissing(Vec<String>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request to homework API failed (from_date={from_date}): {message}")]
    Transport { from_date: i64, message: String },

    #[error("Homework API rejected the request (code={code}): {message}")]
    ServerReject { code: String, message: String },

    #[error("Homework API returned unexpected status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Unexpected response shape: {0}")]
    Shape(String),

    #[error("Missing key in response: {0}")]
    MissingKey(String),

    #[error("Unknown homework status: {0}")]
    UnknownStatus(String),

    #[error("Homework list is empty")]
    EmptyHomeworks,

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Notifier error: {0}")]
    Notifier(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BotError {
    /// Whether the error must stop the process instead of being reported
    pub fn is_fatal(&self) -> bool {
        matches!(self, BotError::ConfigMissing(_) | BotError::Config(_))
    }
}

/// Result type alias for homework bot operations
pub type Result<T> = std::result::Result<T, BotError>;
