mod app_config;
mod config;
mod query;

pub use app_config::{AppConfig, DEFAULT_SEARCH_URL};
pub use config::{build_app_config, load_app_config, load_app_config_from_env};
pub use query::Query;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("{field} must be non-empty")]
    EmptyField { field: &'static str },
}
