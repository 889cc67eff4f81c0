//! API error handling
//!
//! Consistent JSON error responses for the JSON endpoints. Message push
//! verification answers in plain text and never uses these.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;
use wechat::ClientError;

/// Structured JSON error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errcode: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rid: Option<String>,
}

/// API error type that converts to JSON responses
#[derive(Debug)]
pub enum ApiError {
    /// Request is missing required input
    BadRequest(String),
    /// WeChat answered with a non-zero errcode
    WeChat {
        errcode: i64,
        errmsg: String,
        rid: String,
    },
    /// WeChat could not be reached or answered with an HTTP error
    Upstream(String),
    /// Server is missing appId/secret
    NotConfigured,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, response) = match self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: msg,
                    code: Some("bad_request".to_string()),
                    errcode: None,
                    rid: None,
                },
            ),
            ApiError::WeChat {
                errcode,
                errmsg,
                rid,
            } => (
                StatusCode::BAD_GATEWAY,
                ErrorResponse {
                    error: errmsg,
                    code: Some("wechat_error".to_string()),
                    errcode: Some(errcode),
                    rid: (!rid.is_empty()).then_some(rid),
                },
            ),
            ApiError::Upstream(msg) => {
                error!("WeChat request failed: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: "WeChat request failed".to_string(),
                        code: Some("upstream_error".to_string()),
                        errcode: None,
                        rid: None,
                    },
                )
            }
            ApiError::NotConfigured => {
                error!("WECHAT_APP_ID/WECHAT_APP_SECRET missing");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse {
                        error: "Mini-program credentials are not configured".to_string(),
                        code: Some("not_configured".to_string()),
                        errcode: None,
                        rid: None,
                    },
                )
            }
        };

        (status, Json(response)).into_response()
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api {
                errcode,
                errmsg,
                rid,
            } => ApiError::WeChat {
                errcode,
                errmsg,
                rid,
            },
            ClientError::MissingCredentials => ApiError::NotConfigured,
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
