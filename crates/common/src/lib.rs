//! Common types and utilities for the WeChat push service

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{Error, Result};
