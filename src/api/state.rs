use crate::core::AppConfig;

pub struct AppState {
    pub config: AppConfig,
    // Reused across requests for connection pooling
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}
