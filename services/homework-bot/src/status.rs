//! Homework review statuses and their human-readable verdicts

use serde_json::Value;
use std::fmt;

use crate::{BotError, Result};

/// Review status of a single homework
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
    Unknown(String),
}

impl HomeworkStatus {
    /// Parse the status key used by the API
    pub fn parse(key: &str) -> Self {
        match key {
            "approved" => HomeworkStatus::Approved,
            "reviewing" => HomeworkStatus::Reviewing,
            "rejected" => HomeworkStatus::Rejected,
            other => HomeworkStatus::Unknown(other.to_string()),
        }
    }

    /// The verdict shown to the user, or `None` for an unknown status
    pub fn verdict(&self) -> Option<&'static str> {
        match self {
            HomeworkStatus::Approved => Some("Работа проверена: ревьюеру всё понравилось. Ура!"),
            HomeworkStatus::Reviewing => Some("Работа взята на проверку ревьюером."),
            HomeworkStatus::Rejected => Some("Работа проверена: у ревьюера есть замечания."),
            HomeworkStatus::Unknown(_) => None,
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomeworkStatus::Approved => write!(f, "approved"),
            HomeworkStatus::Reviewing => write!(f, "reviewing"),
            HomeworkStatus::Rejected => write!(f, "rejected"),
            HomeworkStatus::Unknown(key) => write!(f, "{}", key),
        }
    }
}

/// The fields of a homework record the bot cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub homework_name: String,
    pub status: HomeworkStatus,
}

impl TryFrom<&Value> for HomeworkRecord {
    type Error = BotError;

    fn try_from(value: &Value) -> Result<Self> {
        let record = value
            .as_object()
            .ok_or_else(|| BotError::Shape("homework record is not an object".to_string()))?;

        let homework_name = record
            .get("homework_name")
            .ok_or_else(|| BotError::MissingKey("homework_name".to_string()))?;
        let status = record
            .get("status")
            .ok_or_else(|| BotError::MissingKey("status".to_string()))?;

        let homework_name = homework_name
            .as_str()
            .ok_or_else(|| BotError::Shape("homework_name is not a string".to_string()))?;
        let status = status
            .as_str()
            .ok_or_else(|| BotError::Shape("status is not a string".to_string()))?;

        Ok(Self {
            homework_name: homework_name.to_string(),
            status: HomeworkStatus::parse(status),
        })
    }
}

impl HomeworkRecord {
    /// The notification text for this record
    pub fn message(&self) -> Result<String> {
        let verdict = self
            .status
            .verdict()
            .ok_or_else(|| BotError::UnknownStatus(self.status.to_string()))?;
        Ok(format!(
            "Status of \"{}\" changed. {}",
            self.homework_name, verdict
        ))
    }
}

/// Translate a raw homework record into its notification text
pub fn parse_status(record: &Value) -> Result<String> {
    HomeworkRecord::try_from(record)?.message()
}
