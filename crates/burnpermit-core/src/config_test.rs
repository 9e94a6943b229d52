use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("BURNPERMIT_COUNTY", "kent");
    m.insert("BURNPERMIT_TOWNSHIP", "grattan");
    m
}

#[test]
fn build_app_config_fails_without_county() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("BURNPERMIT_TOWNSHIP", "grattan");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "BURNPERMIT_COUNTY"),
        "expected MissingEnvVar(BURNPERMIT_COUNTY), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_without_township() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("BURNPERMIT_COUNTY", "kent");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "BURNPERMIT_TOWNSHIP"),
        "expected MissingEnvVar(BURNPERMIT_TOWNSHIP), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_blank_township() {
    let mut map = full_env();
    map.insert("BURNPERMIT_TOWNSHIP", "  ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::EmptyField { field: "township" })),
        "expected EmptyField(township), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.query.county(), "KENT");
    assert_eq!(cfg.query.township(), "GRATTAN");
    assert_eq!(cfg.search_url, DEFAULT_SEARCH_URL);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "burnpermit/0.1 (permit-status)");
}

#[test]
fn build_app_config_search_url_override() {
    let mut map = full_env();
    map.insert("BURNPERMIT_SEARCH_URL", "http://127.0.0.1:8080/search");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.search_url, "http://127.0.0.1:8080/search");
}

#[test]
fn build_app_config_search_url_invalid() {
    let mut map = full_env();
    map.insert("BURNPERMIT_SEARCH_URL", "ftp://example.com/search");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BURNPERMIT_SEARCH_URL"),
        "expected InvalidEnvVar(BURNPERMIT_SEARCH_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_request_timeout_secs_override() {
    let mut map = full_env();
    map.insert("BURNPERMIT_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn build_app_config_request_timeout_secs_invalid() {
    let mut map = full_env();
    map.insert("BURNPERMIT_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BURNPERMIT_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(BURNPERMIT_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_log_level_and_user_agent_override() {
    let mut map = full_env();
    map.insert("BURNPERMIT_LOG_LEVEL", "debug");
    map.insert("BURNPERMIT_USER_AGENT", "custom-agent/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
}
