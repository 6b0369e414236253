use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_UPSTREAM_URL: &str = "https://app.socialinsider.io/api";
const DEFAULT_API_KEY: &str = "API_KEY_TEST";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so an empty environment yields a config that
/// talks to the production Socialinsider endpoint with the bundled key.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("SOCIALPROXY_ENV", "development"))?;
    let bind_addr = parse_addr("SOCIALPROXY_BIND_ADDR", "0.0.0.0:3001")?;
    let log_level = or_default("SOCIALPROXY_LOG_LEVEL", "info");

    let upstream_url = or_default("SOCIALPROXY_UPSTREAM_URL", DEFAULT_UPSTREAM_URL);
    if !upstream_url.starts_with("http://") && !upstream_url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "SOCIALPROXY_UPSTREAM_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{upstream_url}'"),
        });
    }

    let api_key = or_default("SOCIALPROXY_API_KEY", DEFAULT_API_KEY);
    if api_key.trim().is_empty() {
        return Err(ConfigError::MissingEnvVar("SOCIALPROXY_API_KEY".to_string()));
    }

    let image_timeout_secs = parse_u64("SOCIALPROXY_IMAGE_TIMEOUT_SECS", "30")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        upstream_url,
        api_key,
        image_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SOCIALPROXY_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
