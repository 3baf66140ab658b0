//! Integration tests reading the process environment

use envtag::{apply_overrides, decode, load, EnvError, Environment};
use serial_test::serial;
use std::collections::HashMap;
use std::env;
use std::time::Duration;

#[derive(Debug, Default, Environment)]
struct ServerConfig {
    #[env("ENVTAG_TEST_HOST,default=127.0.0.1")]
    pub host: String,

    #[env("ENVTAG_TEST_PORT")]
    pub port: u16,

    #[env("ENVTAG_TEST_TIMEOUT,default=30s")]
    pub timeout: Duration,

    #[env("ENVTAG_TEST_DEBUG,required=false")]
    pub debug: Option<bool>,
}

fn clear() {
    for key in [
        "ENVTAG_TEST_HOST",
        "ENVTAG_TEST_PORT",
        "ENVTAG_TEST_TIMEOUT",
        "ENVTAG_TEST_DEBUG",
    ] {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_decode_from_process() {
    clear();
    env::set_var("ENVTAG_TEST_PORT", "9090");
    env::set_var("ENVTAG_TEST_DEBUG", "on");

    let mut config = ServerConfig::default();
    decode(&mut config).unwrap();

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 9090);
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.debug, Some(true));

    clear();
}

#[test]
#[serial]
fn test_decode_missing_required() {
    clear();

    let result = decode(&mut ServerConfig::default());
    assert!(matches!(
        result,
        Err(EnvError::MissingRequiredValue { .. })
    ));
}

#[test]
#[serial]
fn test_load() {
    clear();
    env::set_var("ENVTAG_TEST_PORT", "8080");
    env::set_var("ENVTAG_TEST_TIMEOUT", "1m");

    let config: ServerConfig = load().unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.timeout, Duration::from_secs(60));

    clear();
}

#[test]
#[serial]
fn test_load_error_has_context() {
    clear();
    env::set_var("ENVTAG_TEST_PORT", "eighty");

    let err = load::<ServerConfig>().unwrap_err();
    assert!(err.to_string().contains("ServerConfig"), "{err}");

    let source = err.downcast_ref::<EnvError>().unwrap();
    assert!(matches!(source, EnvError::InvalidValue { .. }));

    clear();
}

#[test]
#[serial]
fn test_apply_overrides_on_process_env() {
    clear();
    env::set_var("ENVTAG_TEST_PORT", "8080");
    env::set_var("ENVTAG_TEST_HOST", "from-process");

    let mut overrides = HashMap::new();
    overrides.insert("ENVTAG_TEST_PORT".to_string(), Some("7070".to_string()));
    overrides.insert("ENVTAG_TEST_HOST".to_string(), None);

    let mut config = ServerConfig::default();
    let merged = apply_overrides(overrides, &mut config).unwrap();

    assert_eq!(config.port, 7070);
    assert_eq!(config.host, "from-process");
    assert_eq!(merged.get("ENVTAG_TEST_PORT"), Some("7070"));
    // The process environment itself is not modified.
    assert_eq!(env::var("ENVTAG_TEST_PORT").unwrap(), "8080");

    clear();
}
