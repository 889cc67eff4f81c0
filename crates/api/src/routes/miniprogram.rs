//! WeChat mini-program routes

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};
use wechat::{generate_token, ClientError, MessagePush, PhoneInfo, Verification};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Length of the opaque session token handed to the mini-program
const SESSION_TOKEN_LEN: usize = 20;

/// errcodes meaning the access token is invalid or expired
const STALE_TOKEN_ERRCODES: [i64; 2] = [40001, 42001];

/// Message push server verification.
///
/// Always answers 200: the echo string on success, `fail` otherwise.
pub async fn message_push(
    State(state): State<Arc<AppState>>,
    Query(push): Query<MessagePush>,
) -> String {
    debug!("message push query = {:?}", push);

    let outcome = push.verify(state.config.push_token());
    match &outcome {
        Verification::Passed(_) => info!("Message push signature verified"),
        Verification::Failed => warn!(
            "Message push signature mismatch (timestamp={}, nonce={})",
            push.timestamp, push.nonce
        ),
    }
    outcome.into_body()
}

#[derive(Deserialize)]
pub struct CodeRequest {
    #[serde(default)]
    code: String,
}

impl CodeRequest {
    fn code(&self) -> ApiResult<&str> {
        if self.code.is_empty() {
            return Err(ApiError::BadRequest("code is required".to_string()));
        }
        Ok(&self.code)
    }
}

#[derive(Serialize)]
pub struct LoginResponse {
    openid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    unionid: Option<String>,
    token: String,
}

/// Exchange a `wx.login` code for the user's openid and a fresh session token
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CodeRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let session = state.client.code_to_session(req.code()?, None, None).await?;
    info!("Mini-program login for openid {}", session.openid);

    Ok(Json(LoginResponse {
        openid: session.openid,
        unionid: session.unionid,
        token: generate_token(SESSION_TOKEN_LEN),
    }))
}

/// Resolve a `getPhoneNumber` code to the user's phone number
pub async fn phone_number(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CodeRequest>,
) -> ApiResult<Json<PhoneInfo>> {
    let code = req.code()?;
    let access_token = state.access_token.get().await?;

    let result = match state.client.get_phone_number(code, &access_token).await {
        Err(ClientError::Api { errcode, .. }) if STALE_TOKEN_ERRCODES.contains(&errcode) => {
            warn!("Access token rejected (errcode {}), refreshing", errcode);
            state.access_token.invalidate_if(&access_token).await;
            let access_token = state.access_token.get().await?;
            state.client.get_phone_number(code, &access_token).await?
        }
        other => other?,
    };

    result
        .phone_info
        .map(Json)
        .ok_or_else(|| ApiError::Upstream("response carried no phone_info".to_string()))
}
