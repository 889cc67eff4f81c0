//! Response payloads returned by the WeChat server API

use serde::{Deserialize, Serialize};

use crate::rid::parse_rid;

/// `errcode`/`errmsg` pair present on most responses.
///
/// Successful responses often omit both fields, so they default to zero/empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiStatus {
    #[serde(default)]
    pub errcode: i64,
    #[serde(default)]
    pub errmsg: String,
}

impl ApiStatus {
    pub fn is_ok(&self) -> bool {
        self.errcode == 0
    }

    pub fn rid(&self) -> String {
        parse_rid(&self.errmsg)
    }
}

/// Result of `cgi-bin/token`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenResult {
    #[serde(default)]
    pub access_token: String,
    /// Seconds until the token expires
    #[serde(default)]
    pub expires_in: i64,
    #[serde(flatten)]
    pub status: ApiStatus,
}

/// Result of `sns/jscode2session`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResult {
    #[serde(default)]
    pub openid: String,
    #[serde(default)]
    pub session_key: String,
    /// Only present when the mini-program is bound to an open platform account
    pub unionid: Option<String>,
    #[serde(flatten)]
    pub status: ApiStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Watermark {
    pub timestamp: i64,
    pub appid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneInfo {
    /// Number with country code for non-mainland numbers
    pub phone_number: String,
    pub pure_phone_number: String,
    // WeChat sends this as a string on some accounts
    pub country_code: serde_json::Value,
    pub watermark: Watermark,
}

/// Result of `wxa/business/getuserphonenumber`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneNumberResult {
    pub phone_info: Option<PhoneInfo>,
    #[serde(flatten)]
    pub status: ApiStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RidRequest {
    pub invoke_time: i64,
    pub cost_in_ms: i64,
    pub request_url: String,
    pub request_body: String,
    pub response_body: String,
    pub client_ip: String,
}

/// Result of `cgi-bin/openapi/rid/get`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RidInfoResult {
    pub request: Option<RidRequest>,
    #[serde(flatten)]
    pub status: ApiStatus,
}

/// Responses that carry an [`ApiStatus`]
pub trait HasStatus {
    fn status(&self) -> &ApiStatus;
}

macro_rules! impl_has_status {
    ($($ty:ty),* $(,)?) => {
        $(impl HasStatus for $ty {
            fn status(&self) -> &ApiStatus {
                &self.status
            }
        })*
    };
}

impl_has_status!(AccessTokenResult, SessionResult, PhoneNumberResult, RidInfoResult);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_success() {
        let result: AccessTokenResult =
            serde_json::from_str(r#"{"access_token":"ACCESS_TOKEN","expires_in":7200}"#).unwrap();
        assert_eq!(result.access_token, "ACCESS_TOKEN");
        assert_eq!(result.expires_in, 7200);
        assert!(result.status.is_ok());
    }

    #[test]
    fn test_session_error() {
        let result: SessionResult = serde_json::from_str(
            r#"{"errcode":40029,"errmsg":"invalid code, rid: 64a1b2c3-0d0e0f"}"#,
        )
        .unwrap();
        assert!(!result.status.is_ok());
        assert_eq!(result.status.rid(), "64a1b2c3-0d0e0f");
        assert!(result.openid.is_empty());
        assert!(result.unionid.is_none());
    }

    #[test]
    fn test_phone_number() {
        let json = r#"{
            "errcode": 0,
            "errmsg": "ok",
            "phone_info": {
                "phoneNumber": "13800138000",
                "purePhoneNumber": "13800138000",
                "countryCode": 86,
                "watermark": {"timestamp": 1637744274, "appid": "wx123"}
            }
        }"#;
        let result: PhoneNumberResult = serde_json::from_str(json).unwrap();
        let info = result.phone_info.unwrap();
        assert_eq!(info.pure_phone_number, "13800138000");
        assert_eq!(info.country_code, serde_json::json!(86));
        assert_eq!(info.watermark.appid, "wx123");
    }
}
