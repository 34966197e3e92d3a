//! Environment configuration

use assert_matches::assert_matches;
use serial_test::serial;

use blink::shared::{AppConfig, ConfigError};

const VARS: [&str; 4] = ["SERVER_HOST", "SERVER_PORT", "DATABASE_URL", "TOKEN_TTL_HOURS"];

fn clear() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear();
    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.port, 3000);
    assert_eq!(config.token_ttl_hours, 12);
    assert!(config.database_url.is_none());
    assert_eq!(config.bind_addr().to_string(), "0.0.0.0:3000");
}

#[test]
#[serial]
fn test_values_from_environment() {
    clear();
    std::env::set_var("SERVER_HOST", "127.0.0.1");
    std::env::set_var("SERVER_PORT", "8080");
    std::env::set_var("DATABASE_URL", "postgres://blink@localhost/blink");
    std::env::set_var("TOKEN_TTL_HOURS", "1");

    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.bind_addr().to_string(), "127.0.0.1:8080");
    assert_eq!(config.database_url.as_deref(), Some("postgres://blink@localhost/blink"));
    assert_eq!(config.token_ttl_hours, 1);
    clear();
}

#[test]
#[serial]
fn test_invalid_values_rejected() {
    clear();
    std::env::set_var("SERVER_PORT", "not-a-port");
    assert_matches!(AppConfig::from_env(), Err(ConfigError::Invalid("SERVER_PORT", _)));

    clear();
    std::env::set_var("TOKEN_TTL_HOURS", "0");
    assert!(AppConfig::from_env().is_err());

    clear();
    std::env::set_var("DATABASE_URL", "mysql://nope");
    assert_matches!(AppConfig::from_env(), Err(ConfigError::InvalidUrl(_)));
    clear();
}
