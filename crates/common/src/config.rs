//! Application configuration

use std::env;

use crate::Error;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Mini-program appid
    pub app_id: Option<String>,
    /// Mini-program appsecret
    pub app_secret: Option<String>,
    /// Token configured for message push in the mini-program console
    pub push_token: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            app_id: lookup("WECHAT_APP_ID").filter(|v| !v.is_empty()),
            app_secret: lookup("WECHAT_APP_SECRET").filter(|v| !v.is_empty()),
            push_token: lookup("WECHAT_TOKEN"),
        }
    }

    /// Message push token, empty when not configured.
    ///
    /// An empty token still yields a valid signature, so callers keep working
    /// but the check is only as strong as the token.
    pub fn push_token(&self) -> &str {
        self.push_token.as_deref().unwrap_or("")
    }

    /// Collect configuration problems that do not prevent startup
    pub fn validate(&self) -> Vec<Error> {
        let mut problems = Vec::new();
        if self.push_token().is_empty() {
            problems.push(Error::Config(
                "WECHAT_TOKEN is not set, message push signatures use an empty token".to_string(),
            ));
        }
        if self.app_id.is_none() || self.app_secret.is_none() {
            problems.push(Error::Config(
                "WECHAT_APP_ID or WECHAT_APP_SECRET is not set".to_string(),
            ));
        }
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert!(config.app_id.is_none());
        assert_eq!(config.push_token(), "");
        assert_eq!(config.validate().len(), 2);
    }

    #[test]
    fn test_full_config_is_valid() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("WECHAT_APP_ID", "wx123"),
            ("WECHAT_APP_SECRET", "s3cret"),
            ("WECHAT_TOKEN", "token123"),
        ]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.app_id.as_deref(), Some("wx123"));
        assert_eq!(config.push_token(), "token123");
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_bad_port_falls_back() {
        let config = config_from(&[("PORT", "not-a-port")]);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_empty_token_is_flagged() {
        let config = config_from(&[
            ("WECHAT_APP_ID", "wx123"),
            ("WECHAT_APP_SECRET", "s3cret"),
            ("WECHAT_TOKEN", ""),
        ]);
        let problems = config.validate();
        assert_eq!(problems.len(), 1);
        assert!(matches!(problems[0], Error::Config(_)));
    }
}
