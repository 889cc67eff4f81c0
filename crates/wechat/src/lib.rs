//! WeChat mini-program integration: message push verification and API client

pub mod client;
pub mod models;
pub mod nonce;
pub mod rid;
pub mod token_cache;
pub mod verify;

pub use client::{ClientError, Endpoint, MiniProgramClient};
pub use models::{
    AccessTokenResult, ApiStatus, PhoneInfo, PhoneNumberResult, RidInfoResult, SessionResult,
};
pub use nonce::{create_nonce_str, generate_token};
pub use rid::parse_rid;
pub use token_cache::AccessTokenCache;
pub use verify::{sign, verify_message_push, MessagePush, Verification};
