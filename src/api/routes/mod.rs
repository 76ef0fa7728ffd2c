//! API routes module

pub mod summary;

use std::sync::Arc;

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<AppState>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    // Summary proxy, mounted where the browser client expects it
    Router::new().merge(summary::router())
}
