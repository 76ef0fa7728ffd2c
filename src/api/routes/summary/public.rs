//! Public types for the summary API
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Default, Debug)]
pub struct SummaryRequest {
    pub content: Option<String>,
    pub title: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct SummaryResponse {
    pub summary: String,
}
