#![allow(dead_code)]

use std::collections::HashMap;

use spotlog::config::Config;

pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";
pub const API_KEY: &str = "test-dd-key";

/// Base variables every valid configuration needs.
pub fn base_env() -> HashMap<String, String> {
    HashMap::from([
        ("SPOTIFY_CLIENT_ID".to_string(), CLIENT_ID.to_string()),
        ("SPOTIFY_CLIENT_SECRET".to_string(), CLIENT_SECRET.to_string()),
        ("DATADOG_API_KEY".to_string(), API_KEY.to_string()),
    ])
}

pub fn config_from(vars: HashMap<String, String>) -> Config {
    Config::from_lookup(|key| vars.get(key).cloned()).expect("valid test config")
}

/// Configuration pointing every remote endpoint at a mock server.
pub fn mock_config(server_uri: &str) -> Config {
    let mut vars = base_env();
    vars.insert(
        "SPOTIFY_TOKEN_URL".to_string(),
        format!("{}/api/token", server_uri),
    );
    vars.insert("SPOTIFY_API_URL".to_string(), format!("{}/v1", server_uri));
    vars.insert(
        "DATADOG_INTAKE_URL".to_string(),
        format!("{}/v1/input", server_uri),
    );
    vars.insert("LOG_HOST".to_string(), "test-host".to_string());
    config_from(vars)
}
