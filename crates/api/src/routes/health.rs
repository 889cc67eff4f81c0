//! Health check routes

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// False while message push runs with an empty token
    push_token_configured: bool,
    credentials_configured: bool,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let config = &state.config;
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        push_token_configured: !config.push_token().is_empty(),
        credentials_configured: config.app_id.is_some() && config.app_secret.is_some(),
    })
}
