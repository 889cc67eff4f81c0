//! Error types

use thiserror::Error;

/// Main error type for the WeChat push service
#[derive(Error, Debug)]
pub enum Error {
    #[error("WeChat API error: {0}")]
    WeChat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
