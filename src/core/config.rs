use std::env;
use std::fmt;

use crate::spark::{AuthScheme, Credentials};

pub const DEFAULT_API_URL: &str = "https://spark-api-open.xf-yun.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "lite";

#[derive(Clone)]
pub struct AppConfig {
    pub app_id: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub api_url: String,
    pub model: String,
    pub auth_scheme: AuthScheme,
}

impl AppConfig {
    /// Returns the credential set only when every secret is present.
    /// The proxy refuses to call upstream with a partial set.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.app_id, &self.api_key, &self.api_secret) {
            (Some(app_id), Some(api_key), Some(api_secret)) => Some(Credentials {
                app_id: app_id.clone(),
                api_key: api_key.clone(),
                api_secret: api_secret.clone(),
            }),
            _ => None,
        }
    }
}

// Secrets are only ever shown as set or unset
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "***");
        f.debug_struct("AppConfig")
            .field("app_id", &self.app_id)
            .field("api_key", &redact(&self.api_key))
            .field("api_secret", &redact(&self.api_secret))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("auth_scheme", &self.auth_scheme)
            .finish()
    }
}

// Empty values are treated the same as unset ones
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

impl Default for AppConfig {
    fn default() -> Self {
        let app_id = non_empty_var("SPARK_APPID");
        let api_key = non_empty_var("SPARK_API_KEY");
        let api_secret = non_empty_var("SPARK_API_SECRET");
        let api_url = non_empty_var("SPARK_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let model = non_empty_var("SPARK_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let auth_scheme = match non_empty_var("SPARK_AUTH_SCHEME") {
            Some(value) => value.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    "Unknown SPARK_AUTH_SCHEME {}, falling back to {}",
                    value,
                    AuthScheme::default()
                );
                AuthScheme::default()
            }),
            None => AuthScheme::default(),
        };

        Self {
            app_id,
            api_key,
            api_secret,
            api_url,
            model,
            auth_scheme,
        }
    }
}
