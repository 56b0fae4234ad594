//! Configuration loading from disk and the environment.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding the listen port.
pub const ENV_PORT: &str = "PORT";

/// Environment variable selecting the deployment mode.
pub const ENV_MODE: &str = "GATEWAY_ENV";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value `{value}` for {name}")]
    Env { name: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Build the effective configuration: file (or defaults), then environment
/// overrides, then validation.
///
/// `env` is the variable lookup, normally `std::env::var(..).ok()`.
pub fn resolve<F>(path: Option<&Path>, env: F) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    apply_env_overrides(&mut config, env)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply `PORT` and `GATEWAY_ENV` on top of a loaded configuration.
pub fn apply_env_overrides<F>(config: &mut GatewayConfig, env: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = env(ENV_PORT) {
        let port: u16 = value.trim().parse().map_err(|_| ConfigError::Env {
            name: ENV_PORT,
            value: value.clone(),
        })?;
        set_port(config, port);
    }

    if let Some(mode) = env(ENV_MODE) {
        if mode.trim().eq_ignore_ascii_case("development") {
            config.cors.development = true;
        }
    }

    Ok(())
}

/// Replace the port of the listener address, keeping its host.
pub fn set_port(config: &mut GatewayConfig, port: u16) {
    // An unparseable address is left alone; validation reports it.
    if let Ok(mut addr) = config.listener.bind_address.parse::<SocketAddr>() {
        addr.set_port(port);
        config.listener.bind_address = addr.to_string();
    }
}
