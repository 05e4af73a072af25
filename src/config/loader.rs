//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `upstream.base_url`.
pub const ENV_UPSTREAM_URL: &str = "CAT_API_URL";
/// Environment variable overriding `upstream.api_key`.
pub const ENV_UPSTREAM_KEY: &str = "CAT_API_KEY";
/// Environment variable overriding `listener.bind_address`.
pub const ENV_BIND_ADDRESS: &str = "CAT_PROXY_BIND";

/// Why a configuration could not be produced.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[source] std::io::Error),

    #[error("cannot parse config file: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("invalid configuration: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a configuration from a TOML file without validating it.
pub fn read_config_file(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Overlay values taken from `lookup` onto `config`.
///
/// `lookup` is normally `std::env::var(..).ok()`; tests pass a closure over a map.
pub fn apply_env_overrides<F>(config: &mut ProxyConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_UPSTREAM_URL) {
        config.upstream.base_url = url;
    }
    if let Some(key) = lookup(ENV_UPSTREAM_KEY) {
        config.upstream.api_key = key;
    }
    if let Some(bind) = lookup(ENV_BIND_ADDRESS) {
        config.listener.bind_address = bind;
    }
}

/// Load configuration from an optional TOML file plus the process environment.
///
/// The result is not validated yet: command line flags still apply on top,
/// so callers run [`check_config`] once everything is merged.
pub fn load_config(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => ProxyConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

/// Validate a fully merged configuration.
pub fn check_config(config: &ProxyConfig) -> Result<(), ConfigError> {
    validate_config(config).map_err(ConfigError::Validation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_env_overrides_replace_file_values() {
        let env: HashMap<&str, &str> = [
            (ENV_UPSTREAM_URL, "http://127.0.0.1:9999"),
            (ENV_UPSTREAM_KEY, "secret"),
        ]
        .into_iter()
        .collect();

        let mut config = ProxyConfig::default();
        apply_env_overrides(&mut config, |name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.upstream.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.upstream.api_key, "secret");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8787");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = read_config_file(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_invalid_bind_can_be_fixed_before_checking() {
        let path = std::env::temp_dir().join(format!("cat-proxy-{}.toml", std::process::id()));
        fs::write(&path, "[listener]\nbind_address = \"not an address\"\n").unwrap();

        let loaded = load_config(Some(&path));
        fs::remove_file(&path).unwrap();
        let mut config = loaded.expect("loading must not validate");

        assert!(matches!(check_config(&config), Err(ConfigError::Validation(_))));
        config.listener.bind_address = "127.0.0.1:8787".to_string();
        assert!(check_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_display_lists_all() {
        let err = ConfigError::Validation(vec![
            ValidationError::ZeroBodyLimit,
            ValidationError::ZeroTimeout("request_secs"),
        ]);
        let rendered = err.to_string();
        assert!(rendered.starts_with("invalid configuration: "));
        assert!(rendered.contains("max_body_size"));
        assert!(rendered.contains("request_secs"));
    }
}
