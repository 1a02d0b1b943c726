//! Shared domain types for Carbon0: marketplace detection, the canonical
//! [`Product`] record, and environment-driven configuration.

pub mod app_config;
pub mod config;
pub mod platform;
pub mod products;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use platform::{detect_platform, is_supported, Platform};
pub use products::Product;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unrecognised marketplace label: {0}")]
    UnknownPlatform(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
