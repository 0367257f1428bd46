//! Per-process loop state: the polling watermark and the last messages sent

use std::collections::HashMap;

/// State owned by the polling loop; reset on every restart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopState {
    /// Lower bound passed to the API as `from_date`
    pub current_timestamp: i64,
    pub last_sent_message: String,
    pub last_sent_error_message: String,
    /// Last message delivered for each homework, keyed by name
    pub last_sent_by_homework: HashMap<String, String>,
}

impl LoopState {
    pub fn new(initial_timestamp: i64) -> Self {
        Self {
            current_timestamp: initial_timestamp,
            ..Self::default()
        }
    }

    /// Whether `message` differs from the last status message delivered
    pub fn is_new_message(&self, message: &str) -> bool {
        self.last_sent_message != message
    }

    /// Whether `message` differs from the last error report delivered
    pub fn is_new_error(&self, message: &str) -> bool {
        self.last_sent_error_message != message
    }

    /// Whether `message` differs from the last one delivered for `homework_name`
    pub fn is_new_status(&self, homework_name: &str, message: &str) -> bool {
        self.last_sent_by_homework
            .get(homework_name)
            .is_none_or(|last| last != message)
    }

    pub fn record_message(&mut self, homework_name: &str, message: String) {
        self.last_sent_by_homework
            .insert(homework_name.to_string(), message.clone());
        self.last_sent_message = message;
    }

    pub fn record_error(&mut self, message: String) {
        self.last_sent_error_message = message;
    }

    /// Move the watermark to `timestamp`, returning true if it changed
    pub fn advance_to(&mut self, timestamp: i64) -> bool {
        let changed = self.current_timestamp != timestamp;
        self.current_timestamp = timestamp;
        changed
    }
}
