use std::sync::Arc;

use axum::{Json, response::IntoResponse};
use tracing::info;

use crate::api::HealthResponse;
use crate::bookmarks::BookmarkStore;
use crate::error::ErrorPolicy;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookmarkStore>,
    pub api_token: Arc<str>,
    pub errors: ErrorPolicy,
}

impl AppState {
    pub fn new(store: Arc<dyn BookmarkStore>, api_token: &str, errors: ErrorPolicy) -> Self {
        AppState {
            store,
            api_token: Arc::from(api_token),
            errors,
        }
    }
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    Json(HealthResponse::new("ok"))
}
