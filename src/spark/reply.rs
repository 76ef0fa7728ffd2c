use std::fmt;

use http::StatusCode;
use serde_json::Value;

/// Every shape of answer Spark can give once a body has been read.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Trimmed assistant message content
    Summary(String),
    /// Success status with a first choice whose message is not a usable
    /// assistant reply
    MalformedMessage,
    /// Structured `error` object reported by the provider
    ProviderError {
        status: StatusCode,
        message: String,
        code: String,
    },
    /// Non-success status without a structured error. `body` holds a
    /// printable rendition of whatever was returned, if any.
    HttpFailure {
        status: StatusCode,
        body: Option<String>,
    },
    /// Success status but nothing recognizable in the body
    UnknownFormat { status: StatusCode },
}

/// The upstream body was not valid JSON.
#[derive(Debug)]
pub struct InvalidJson(pub serde_json::Error);

impl fmt::Display for InvalidJson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to parse Spark API response as JSON: {}", self.0)
    }
}

impl std::error::Error for InvalidJson {}

// Mirrors how loosely typed clients treat "present" values: null,
// false, 0 and "" all count as missing.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn first_message(data: &Value) -> Option<&Value> {
    data.get("choices")?
        .as_array()?
        .first()?
        .get("message")
        .filter(|m| is_truthy(m))
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl Reply {
    /// Classifies an upstream answer. Precedence matters: a usable
    /// first choice wins over an `error` field, which wins over the
    /// HTTP status.
    pub fn decode(status: StatusCode, body: &[u8]) -> Result<Reply, InvalidJson> {
        let data: Value = serde_json::from_slice(body).map_err(InvalidJson)?;

        if status.is_success() {
            if let Some(message) = first_message(&data) {
                let role = message.get("role").and_then(Value::as_str);
                let content = message
                    .get("content")
                    .and_then(Value::as_str)
                    .filter(|c| !c.is_empty());

                return Ok(match (role, content) {
                    (Some("assistant"), Some(content)) => Reply::Summary(content.trim().to_string()),
                    _ => Reply::MalformedMessage,
                });
            }
        }

        if let Some(error) = data.get("error").filter(|e| is_truthy(e)) {
            let message = match error {
                Value::Object(obj) => obj
                    .get("message")
                    .filter(|m| !m.is_null())
                    .map(render_scalar)
                    .unwrap_or_else(|| "N/A".to_string()),
                other => render_scalar(other),
            };
            let code = error
                .get("code")
                .filter(|c| is_truthy(c))
                .map(render_scalar)
                .unwrap_or_else(|| "N/A".to_string());

            return Ok(Reply::ProviderError {
                status,
                message,
                code,
            });
        }

        if !status.is_success() {
            let body = match &data {
                Value::Object(_) | Value::Array(_) => Some(data.to_string()),
                Value::String(s) => Some(s.clone()),
                _ => None,
            };
            return Ok(Reply::HttpFailure { status, body });
        }

        Ok(Reply::UnknownFormat { status })
    }
}
