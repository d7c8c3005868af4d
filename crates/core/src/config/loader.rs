use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix for structured environment overrides, nested with `__`
/// (e.g. `ACTIVATOR_SHOPIFY__ACCESS_TOKEN`).
pub const ENV_PREFIX: &str = "ACTIVATOR_";

/// Flat variable names accepted for compatibility with older deployments.
const LEGACY_ENV: &[(&str, &str)] = &[
    ("TARGET_PRODUCT_ID", "activation.target_product_id"),
    ("SHOPIFY_STORE", "shopify.store"),
    ("SHOPIFY_ACCESS_TOKEN", "shopify.access_token"),
    ("PORT", "server.port"),
];

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    extract(Figment::new().merge(Toml::file(path)))
}

/// Load configuration from environment variables only
pub fn load_config_from_env() -> Result<Config, ConfigError> {
    extract(Figment::new())
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn extract(figment: Figment) -> Result<Config, ConfigError> {
    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .merge(legacy_env())
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn legacy_env() -> Env {
    Env::raw().filter_map(|key| {
        LEGACY_ENV
            .iter()
            .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
            .map(|(_, path)| (*path).into())
    })
}
