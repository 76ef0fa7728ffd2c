//! Public API types

use std::fmt;

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};

// Errors

/// JSON body returned for every failed request.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Every way a summary request can fail. Each variant maps to
/// exactly one status code and client-facing message.
#[derive(Debug)]
pub enum ProxyError {
    MissingCredentials,
    UnreadableBody {
        status: StatusCode,
        reason: String,
    },
    InvalidBody(serde_json::Error),
    MissingContent,
    Unreachable(reqwest::Error),
    UnparsableReply {
        source: serde_json::Error,
        body: String,
    },
    NoValidSummary {
        body: String,
    },
    Provider {
        status: StatusCode,
        message: String,
        code: String,
    },
    UpstreamStatus {
        status: StatusCode,
        body: Option<String>,
    },
    UnknownFormat {
        status: StatusCode,
        body: String,
    },
    Internal(anyhow::Error),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidBody(_) | ProxyError::MissingContent => StatusCode::BAD_REQUEST,
            ProxyError::UnreadableBody { status, .. }
            | ProxyError::Provider { status, .. }
            | ProxyError::UpstreamStatus { status, .. } => *status,
            ProxyError::MissingCredentials
            | ProxyError::Unreachable(_)
            | ProxyError::UnparsableReply { .. }
            | ProxyError::NoValidSummary { .. }
            | ProxyError::UnknownFormat { .. }
            | ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorResponse {
        let error = match self {
            ProxyError::MissingCredentials => "服务器内部错误：API凭证未配置".to_string(),
            ProxyError::UnreadableBody { .. } => "请求体过大或无法读取".to_string(),
            ProxyError::InvalidBody(_) => "请求体不是有效的 JSON".to_string(),
            ProxyError::MissingContent => "请求体缺少 'content' 字段".to_string(),
            ProxyError::Unreachable(_) => "代理服务器未能连接到 Spark API".to_string(),
            ProxyError::UnparsableReply { .. } => "代理服务器错误：无法解析 Spark API 响应".to_string(),
            ProxyError::NoValidSummary { .. } => "未能从 Spark 获取有效摘要内容".to_string(),
            ProxyError::Provider { message, code, .. } => {
                format!("Spark API 错误: {} (Code: {})", message, code)
            }
            ProxyError::UpstreamStatus { status, body } => match body {
                Some(body) => format!("获取摘要失败，状态码: {} - {}", status.as_u16(), body),
                None => format!("获取摘要失败，状态码: {}", status.as_u16()),
            },
            ProxyError::UnknownFormat { status, .. } => {
                format!("获取摘要失败，状态码: {}, 响应格式未知", status.as_u16())
            }
            ProxyError::Internal(_) => "代理服务器内部错误".to_string(),
        };
        let details = match self {
            ProxyError::Internal(err) => Some(err.to_string()),
            _ => None,
        };

        ErrorResponse { error, details }
    }
}

/// Operator facing description used for logging.
impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyError::MissingCredentials => {
                write!(f, "Spark environment variables not configured")
            }
            ProxyError::UnreadableBody { status, reason } => {
                write!(f, "Failed to read request body ({}): {}", status, reason)
            }
            ProxyError::InvalidBody(e) => write!(f, "Invalid request body: {}", e),
            ProxyError::MissingContent => write!(f, "Request body missing 'content'"),
            ProxyError::Unreachable(e) => write!(f, "Failed to fetch Spark API: {}", e),
            ProxyError::UnparsableReply { source, body } => write!(
                f,
                "Failed to parse Spark API response as JSON: {}. Raw response: {}",
                source, body
            ),
            ProxyError::NoValidSummary { body } => write!(
                f,
                "Spark response had unexpected message role or content: {}",
                body
            ),
            ProxyError::Provider {
                status,
                message,
                code,
            } => write!(f, "Spark API error {}: {} (code {})", status, message, code),
            ProxyError::UpstreamStatus { status, body } => write!(
                f,
                "Spark request failed with {}: {}",
                status,
                body.as_deref().unwrap_or("<empty>")
            ),
            ProxyError::UnknownFormat { status, body } => write!(
                f,
                "Spark response with {} had an unexpected format: {}",
                status, body
            ),
            ProxyError::Internal(e) => write!(f, "Proxy error: {:#}", e),
        }
    }
}

/// Convert `ProxyError` into an Axum compatible response.
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        // Client mistakes are not worth an error level log
        match &self {
            ProxyError::UnreadableBody { .. }
            | ProxyError::InvalidBody(_)
            | ProxyError::MissingContent => {
                tracing::warn!("{}", self)
            }
            _ => tracing::error!("{}", self),
        }

        (self.status(), Json(self.body())).into_response()
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>`. Anything converted this way is reported as an
/// internal error with the cause attached as `details`.
impl<E> From<E> for ProxyError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}

// Re-export public types from each route

pub mod summary {
    pub use crate::api::routes::summary::public::*;
}
