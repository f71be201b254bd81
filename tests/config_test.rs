mod common;

use std::time::Duration;

use spotlog::{config::*, error::ConfigError};

use common::{base_env, config_from};

fn load(vars: &std::collections::HashMap<String, String>) -> Result<Config, ConfigError> {
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults_applied() {
    let config = config_from(base_env());

    assert_eq!(config.client_id, "test-client");
    assert_eq!(config.redirect_uri, DEFAULT_REDIRECT_URI);
    assert_eq!(config.scope, DEFAULT_SCOPE);
    assert_eq!(config.auth_url.as_str(), DEFAULT_AUTH_URL);
    assert_eq!(config.token_url.as_str(), DEFAULT_TOKEN_URL);
    assert_eq!(config.server_addr.port(), 5000);
    assert_eq!(config.poll_interval, Duration::from_secs(5));
    assert_eq!(config.max_wait, None);
    assert_eq!(config.log_host, DEFAULT_LOG_HOST);
}

#[test]
fn test_each_credential_is_required() {
    for var in [CLIENT_ID_VAR, CLIENT_SECRET_VAR, INGEST_API_KEY_VAR] {
        let mut vars = base_env();
        vars.remove(var);

        match load(&vars) {
            Err(ConfigError::Missing(missing)) => assert_eq!(missing, var),
            other => panic!("expected missing {}, got {:?}", var, other),
        }
    }
}

#[test]
fn test_empty_credential_counts_as_missing() {
    let mut vars = base_env();
    vars.insert(CLIENT_SECRET_VAR.to_string(), "   ".to_string());

    assert!(matches!(
        load(&vars),
        Err(ConfigError::Missing(CLIENT_SECRET_VAR))
    ));
}

#[test]
fn test_poll_settings_parsed() {
    let mut vars = base_env();
    vars.insert("POLL_INTERVAL_SECS".to_string(), "2".to_string());
    vars.insert("MAX_WAIT_SECS".to_string(), "120".to_string());

    let config = config_from(vars);
    assert_eq!(config.poll_interval, Duration::from_secs(2));
    assert_eq!(config.max_wait, Some(Duration::from_secs(120)));
}

#[test]
fn test_invalid_values_rejected() {
    let cases = [
        ("POLL_INTERVAL_SECS", "0"),
        ("POLL_INTERVAL_SECS", "soon"),
        ("MAX_WAIT_SECS", "-1"),
        ("SERVER_ADDRESS", "localhost"),
        ("SPOTIFY_TOKEN_URL", "not a url"),
    ];

    for (var, value) in cases {
        let mut vars = base_env();
        vars.insert(var.to_string(), value.to_string());

        match load(&vars) {
            Err(ConfigError::Invalid { var: got, .. }) => assert_eq!(got, var),
            other => panic!("expected {}={} to be invalid, got {:?}", var, value, other),
        }
    }
}
