//! API routes

pub mod health;
pub mod miniprogram;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/wechat/message-push", get(miniprogram::message_push))
        .route("/wechat/login", post(miniprogram::login))
        .route("/wechat/phone-number", post(miniprogram::phone_number))
        .with_state(state)
}
