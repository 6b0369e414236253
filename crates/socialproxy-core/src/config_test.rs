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

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SOCIALPROXY_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3001");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.upstream_url, "https://app.socialinsider.io/api");
    assert_eq!(cfg.api_key, "API_KEY_TEST");
    assert_eq!(cfg.image_timeout_secs, 30);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("SOCIALPROXY_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SOCIALPROXY_BIND_ADDR"),
        "expected InvalidEnvVar(SOCIALPROXY_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_http_upstream() {
    let mut map = HashMap::new();
    map.insert("SOCIALPROXY_UPSTREAM_URL", "ftp://example.com/api");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SOCIALPROXY_UPSTREAM_URL"),
        "expected InvalidEnvVar(SOCIALPROXY_UPSTREAM_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_blank_api_key() {
    let mut map = HashMap::new();
    map.insert("SOCIALPROXY_API_KEY", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SOCIALPROXY_API_KEY"),
        "expected MissingEnvVar(SOCIALPROXY_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_image_timeout_override() {
    let mut map = HashMap::new();
    map.insert("SOCIALPROXY_IMAGE_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.image_timeout_secs, 5);
}

#[test]
fn build_app_config_image_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("SOCIALPROXY_IMAGE_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SOCIALPROXY_IMAGE_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SOCIALPROXY_IMAGE_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_api_key() {
    let mut map = HashMap::new();
    map.insert("SOCIALPROXY_API_KEY", "super-secret-key");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret-key"));
    assert!(rendered.contains("[redacted]"));
}
