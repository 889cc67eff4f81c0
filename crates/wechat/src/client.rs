//! Mini-program server API client
//!
//! Every call is described by an [`Endpoint`] (path plus verb) and goes
//! through a single request routine that checks both the HTTP status and the
//! `errcode` embedded in the JSON body.

use common::Config;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{
    AccessTokenResult, ApiStatus, HasStatus, PhoneNumberResult, RidInfoResult, SessionResult,
};

pub const DEFAULT_BASE_URL: &str = "https://api.weixin.qq.com";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("WeChat API error: {errcode} - {errmsg}")]
    Api {
        errcode: i64,
        errmsg: String,
        rid: String,
    },
    #[error("Unexpected HTTP status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("No appId or secret configured")]
    MissingCredentials,
    #[error("Response is missing {0}")]
    MissingField(&'static str),
}

impl From<ClientError> for common::Error {
    fn from(err: ClientError) -> Self {
        common::Error::WeChat(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A server API endpoint relative to the base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub path: &'static str,
    pub method: HttpMethod,
}

impl Endpoint {
    const fn get(path: &'static str) -> Self {
        Self {
            path,
            method: HttpMethod::Get,
        }
    }

    const fn post(path: &'static str) -> Self {
        Self {
            path,
            method: HttpMethod::Post,
        }
    }

    pub const ACCESS_TOKEN: Endpoint = Endpoint::get("/cgi-bin/token");
    pub const CODE_TO_SESSION: Endpoint = Endpoint::get("/sns/jscode2session");
    pub const PHONE_NUMBER: Endpoint = Endpoint::post("/wxa/business/getuserphonenumber");
    pub const RID_INFO: Endpoint = Endpoint::post("/cgi-bin/openapi/rid/get");
    pub const PLUGIN_OPEN_PID: Endpoint = Endpoint::post("/wxa/getpluginopenpid");
    pub const QUERY_SCHEME: Endpoint = Endpoint::post("/wxa/queryscheme");
}

/// Mini-program API client
pub struct MiniProgramClient {
    client: reqwest::Client,
    base_url: String,
    app_id: Option<String>,
    secret: Option<String>,
}

impl MiniProgramClient {
    pub fn new(app_id: Option<String>, secret: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            app_id,
            secret,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.app_id.clone(), config.app_secret.clone())
    }

    /// Point the client at another host, used by tests
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path)
    }

    /// Explicit credentials win only when both are given, otherwise fall back
    /// to the configured pair.
    fn credentials(
        &self,
        app_id: Option<&str>,
        secret: Option<&str>,
    ) -> Result<(String, String), ClientError> {
        let (app_id, secret) = match (app_id, secret) {
            (Some(a), Some(s)) if !a.is_empty() && !s.is_empty() => (Some(a), Some(s)),
            _ => (self.app_id.as_deref(), self.secret.as_deref()),
        };
        match (app_id, secret) {
            (Some(a), Some(s)) if !a.is_empty() && !s.is_empty() => {
                Ok((a.to_string(), s.to_string()))
            }
            _ => Err(ClientError::MissingCredentials),
        }
    }

    async fn call<T>(
        &self,
        endpoint: Endpoint,
        query: &[(&str, &str)],
        body: Option<serde_json::Value>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned + HasStatus,
    {
        let url = self.url(endpoint);
        debug!("{:?} {}", endpoint.method, url);

        let request = match endpoint.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };
        let request = request.query(query);
        let request = match body {
            Some(body) => request.json(&body),
            None => request,
        };
        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let result: T = resp.json().await?;
        let api_status = result.status();
        if !api_status.is_ok() {
            warn!(
                "{} returned errcode {}: {}",
                endpoint.path, api_status.errcode, api_status.errmsg
            );
            return Err(ClientError::Api {
                errcode: api_status.errcode,
                errmsg: api_status.errmsg.clone(),
                rid: api_status.rid(),
            });
        }
        Ok(result)
    }

    /// Fetch the global access token, valid for 7200 seconds
    pub async fn get_access_token(
        &self,
        app_id: Option<&str>,
        secret: Option<&str>,
    ) -> Result<AccessTokenResult, ClientError> {
        let (app_id, secret) = self.credentials(app_id, secret)?;
        self.call(
            Endpoint::ACCESS_TOKEN,
            &[
                ("grant_type", "client_credential"),
                ("appid", &app_id),
                ("secret", &secret),
            ],
            None,
        )
        .await
    }

    /// Exchange a `wx.login` code for the user's openid and session key
    pub async fn code_to_session(
        &self,
        code: &str,
        app_id: Option<&str>,
        secret: Option<&str>,
    ) -> Result<SessionResult, ClientError> {
        let (app_id, secret) = self.credentials(app_id, secret)?;
        self.call(
            Endpoint::CODE_TO_SESSION,
            &[
                ("appid", &app_id),
                ("secret", &secret),
                ("js_code", code),
                ("grant_type", "authorization_code"),
            ],
            None,
        )
        .await
    }

    pub async fn get_phone_number(
        &self,
        code: &str,
        access_token: &str,
    ) -> Result<PhoneNumberResult, ClientError> {
        self.call(
            Endpoint::PHONE_NUMBER,
            &[("access_token", access_token)],
            Some(json!({ "code": code })),
        )
        .await
    }

    /// Look up a failed request by the rid found in its `errmsg`
    pub async fn get_rid_info(
        &self,
        rid: &str,
        access_token: &str,
    ) -> Result<RidInfoResult, ClientError> {
        self.call(
            Endpoint::RID_INFO,
            &[("access_token", access_token)],
            Some(json!({ "rid": rid })),
        )
        .await
    }

    /// Returns the raw body, it carries `openpid` next to the status fields
    pub async fn get_plugin_open_pid(
        &self,
        code: &str,
        access_token: &str,
    ) -> Result<serde_json::Value, ClientError> {
        let raw: RawResponse = self
            .call(
                Endpoint::PLUGIN_OPEN_PID,
                &[("access_token", access_token)],
                Some(json!({ "code": code })),
            )
            .await?;
        Ok(raw.body)
    }

    pub async fn query_scheme(
        &self,
        scheme: &str,
        access_token: &str,
    ) -> Result<serde_json::Value, ClientError> {
        let raw: RawResponse = self
            .call(
                Endpoint::QUERY_SCHEME,
                &[("access_token", access_token)],
                Some(json!({ "scheme": scheme })),
            )
            .await?;
        Ok(raw.body)
    }
}

/// Untyped body with its status split out
#[derive(serde::Deserialize)]
#[serde(from = "serde_json::Value")]
struct RawResponse {
    body: serde_json::Value,
    status: ApiStatus,
}

impl From<serde_json::Value> for RawResponse {
    fn from(body: serde_json::Value) -> Self {
        let status = serde_json::from_value(body.clone()).unwrap_or_default();
        Self { body, status }
    }
}

impl HasStatus for RawResponse {
    fn status(&self) -> &ApiStatus {
        &self.status
    }
}
