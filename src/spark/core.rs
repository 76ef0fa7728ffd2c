use std::fmt;
use std::str::FromStr;

use anyhow::{Error, anyhow};
use bytes::Bytes;
use http::{StatusCode, header};
use serde::{Deserialize, Serialize};

pub const SYSTEM_PROMPT: &str =
    "你是一个有用的助手，请根据用户提供的文章标题和内容生成一段简洁的摘要。";
pub const UNTITLED: &str = "无标题";
pub const TEMPERATURE: f32 = 0.5;
pub const MAX_TOKENS: u32 = 200;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

/// Body of the OpenAI compatible chat completion call made to Spark.
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatRequest {
    /// Builds the summarization prompt for an article. A missing or
    /// empty title is replaced with a placeholder.
    pub fn summarize(model: &str, title: Option<&str>, content: &str) -> Self {
        let title = title.filter(|t| !t.is_empty()).unwrap_or(UNTITLED);
        let user_prompt = format!("文章标题：{}\n文章内容：{}", title, content);

        Self {
            model: model.to_string(),
            messages: vec![
                Message::new(Role::System, SYSTEM_PROMPT),
                Message::new(Role::User, &user_prompt),
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

#[derive(Clone)]
pub struct Credentials {
    pub app_id: String,
    pub api_key: String,
    pub api_secret: String,
}

// Never print secrets, even at debug level
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("api_key", &"***")
            .field("api_secret", &"***")
            .finish()
    }
}

/// How the credential pair is presented to Spark in the
/// `Authorization` header.
///
/// The provider documents more than one form depending on the
/// product tier, so the scheme is chosen by configuration rather than
/// fixed in code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Bearer {api_key}:{api_secret}`
    #[default]
    KeySecret,
    /// `Bearer {api_key}` where the key is the console's API password
    Password,
}

impl AuthScheme {
    pub fn authorization(&self, credentials: &Credentials) -> String {
        match self {
            AuthScheme::KeySecret => {
                format!("Bearer {}:{}", credentials.api_key, credentials.api_secret)
            }
            AuthScheme::Password => format!("Bearer {}", credentials.api_key),
        }
    }
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthScheme::KeySecret => write!(f, "key-secret"),
            AuthScheme::Password => write!(f, "password"),
        }
    }
}

impl FromStr for AuthScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "key-secret" => Ok(AuthScheme::KeySecret),
            "password" => Ok(AuthScheme::Password),
            other => Err(anyhow!("Unsupported auth scheme: {}", other)),
        }
    }
}

/// Failures that happen before a complete upstream body is in hand.
#[derive(Debug)]
pub enum UpstreamError {
    /// The request never got a response
    Transport(reqwest::Error),
    /// A response arrived but reading its body failed
    Body(reqwest::Error),
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamError::Transport(e) => write!(f, "Failed to fetch Spark API: {}", e),
            UpstreamError::Body(e) => write!(f, "Failed to read Spark API response: {}", e),
        }
    }
}

impl std::error::Error for UpstreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UpstreamError::Transport(e) | UpstreamError::Body(e) => Some(e),
        }
    }
}

/// Sends a single chat completion request and returns the raw status
/// and body. Decoding is left to `Reply::decode` so that every kind
/// of upstream answer, including non-JSON ones, can be reported.
pub async fn completion(
    client: &reqwest::Client,
    api_url: &str,
    credentials: &Credentials,
    auth_scheme: AuthScheme,
    request: &ChatRequest,
) -> Result<(StatusCode, Bytes), UpstreamError> {
    tracing::debug!(
        "Requesting summary from {} with model {} ({} auth)",
        api_url,
        request.model,
        auth_scheme
    );

    let response = client
        .post(api_url)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, auth_scheme.authorization(credentials))
        .json(request)
        .send()
        .await
        .map_err(UpstreamError::Transport)?;

    let status = response.status();
    let body = response.bytes().await.map_err(UpstreamError::Body)?;

    Ok((status, body))
}
