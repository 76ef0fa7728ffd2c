//! Router for the summary API

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{Method, StatusCode, header},
    response::{IntoResponse, Json},
    routing::{MethodRouter, post},
};

use super::public::{SummaryRequest, SummaryResponse};
use crate::api::public::ProxyError;
use crate::api::state::AppState;
use crate::spark::{ChatRequest, InvalidJson, Reply, UpstreamError, completion};
use serde_json::Value;

type SharedState = Arc<AppState>;

/// Largest request body accepted by the summary endpoint
pub const BODY_LIMIT: usize = 2 * 1024 * 1024;

// An empty body is treated like `{}` so the missing field is what
// gets reported. Anything other than a JSON object carries no
// `content` field.
fn parse_request(body: &[u8]) -> Result<SummaryRequest, ProxyError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(SummaryRequest::default());
    }
    let value: Value = serde_json::from_slice(body).map_err(ProxyError::InvalidBody)?;
    if !value.is_object() {
        return Err(ProxyError::MissingContent);
    }
    serde_json::from_value(value).map_err(ProxyError::InvalidBody)
}

/// Summarize an article through the Spark chat completion API
async fn summarize(
    State(state): State<SharedState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SummaryResponse>, ProxyError> {
    // Fail closed before looking at the request at all
    let credentials = state
        .config
        .credentials()
        .ok_or(ProxyError::MissingCredentials)?;

    let body = body.map_err(|rejection| ProxyError::UnreadableBody {
        status: rejection.status(),
        reason: rejection.body_text(),
    })?;
    let payload = parse_request(&body)?;
    let content = payload
        .content
        .filter(|c| !c.is_empty())
        .ok_or(ProxyError::MissingContent)?;

    let request = ChatRequest::summarize(&state.config.model, payload.title.as_deref(), &content);
    let (status, upstream_body) = completion(
        &state.client,
        &state.config.api_url,
        &credentials,
        state.config.auth_scheme,
        &request,
    )
    .await
    .map_err(|err| match err {
        UpstreamError::Transport(e) => ProxyError::Unreachable(e),
        other => ProxyError::from(other),
    })?;

    let raw_body = || String::from_utf8_lossy(&upstream_body).into_owned();
    let reply =
        Reply::decode(status, &upstream_body).map_err(|InvalidJson(source)| {
            ProxyError::UnparsableReply {
                source,
                body: raw_body(),
            }
        })?;

    match reply {
        Reply::Summary(summary) => Ok(Json(SummaryResponse { summary })),
        Reply::MalformedMessage => Err(ProxyError::NoValidSummary { body: raw_body() }),
        Reply::ProviderError {
            status,
            message,
            code,
        } => Err(ProxyError::Provider {
            status,
            message,
            code,
        }),
        Reply::HttpFailure { status, body } => Err(ProxyError::UpstreamStatus { status, body }),
        Reply::UnknownFormat { status } => Err(ProxyError::UnknownFormat {
            status,
            body: raw_body(),
        }),
    }
}

/// CORS preflight. Headers are added by the CORS middleware.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed(method: Method) -> impl IntoResponse {
    tracing::warn!("Rejected {} request", method);
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST, OPTIONS")],
        format!("Method {} Not Allowed", method),
    )
}

/// The summary handler for a single path
pub fn endpoint() -> MethodRouter<SharedState> {
    post(summarize)
        .options(preflight)
        .fallback(method_not_allowed)
}

/// Create the summary router
pub fn router() -> Router<SharedState> {
    Router::new().route("/spark-proxy", endpoint())
}
