//! Shape checks for the homework API payload

use serde_json::Value;

use crate::{BotError, Result};

/// A payload that passed the shape checks
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Raw homework records, newest first, as sent by the server
    pub homeworks: Vec<Value>,
    /// Server time to use as the next `from_date`
    pub current_date: Option<i64>,
}

/// Validate the decoded payload and extract its homework records
pub fn check_response(payload: &Value) -> Result<ApiResponse> {
    let object = payload.as_object().ok_or_else(|| {
        BotError::Shape(format!("response is not an object: {}", kind_of(payload)))
    })?;

    let homeworks = object
        .get("homeworks")
        .ok_or_else(|| BotError::MissingKey("homeworks".to_string()))?;

    let homeworks = homeworks.as_array().ok_or_else(|| {
        BotError::Shape(format!("homeworks is not a list: {}", kind_of(homeworks)))
    })?;

    let current_date = match object.get("current_date") {
        None | Some(Value::Null) => None,
        Some(value) => {
            let parsed = value.as_i64();
            if parsed.is_none() {
                tracing::warn!("Ignoring non-integer current_date: {}", value);
            }
            parsed
        }
    };

    tracing::debug!(
        "Response has {} homework(s), current_date={:?}",
        homeworks.len(),
        current_date
    );

    Ok(ApiResponse {
        homeworks: homeworks.clone(),
        current_date,
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
