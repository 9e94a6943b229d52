use crate::app_config::{AppConfig, DEFAULT_SEARCH_URL};
use crate::{ConfigError, Query};

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap` lookup, and so the CLI can layer flag values over the real env.
///
/// # Errors
///
/// Returns `ConfigError` if required values are missing or invalid.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let county = require("BURNPERMIT_COUNTY")?;
    let township = require("BURNPERMIT_TOWNSHIP")?;
    let query = Query::new(&county, &township)?;

    let search_url = or_default("BURNPERMIT_SEARCH_URL", DEFAULT_SEARCH_URL);
    if !(search_url.starts_with("http://") || search_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "BURNPERMIT_SEARCH_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{search_url}'"),
        });
    }

    let log_level = or_default("BURNPERMIT_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("BURNPERMIT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("BURNPERMIT_USER_AGENT", "burnpermit/0.1 (permit-status)");

    Ok(AppConfig {
        query,
        search_url,
        log_level,
        request_timeout_secs,
        user_agent,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
