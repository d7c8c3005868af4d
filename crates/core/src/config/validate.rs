use super::{types::Config, ConfigError};

/// Served by the liveness probe, so unavailable for webhooks.
const RESERVED_HEALTH_PATH: &str = "/health";

/// Validate configuration
/// Currently validates:
/// - Server port is not 0 and the webhook path is absolute and free
/// - Shopify store, access token and API version are usable
/// - A target product is set and at least one lookup is allowed
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if !config.server.webhook_path.starts_with('/') {
        return Err(ConfigError::ValidationError(format!(
            "server.webhook_path must start with '/': {:?}",
            config.server.webhook_path
        )));
    }

    if config.server.webhook_path == RESERVED_HEALTH_PATH {
        return Err(ConfigError::ValidationError(format!(
            "server.webhook_path cannot be {}",
            RESERVED_HEALTH_PATH
        )));
    }

    if config.shopify.store.trim().is_empty() && config.shopify.base_url.is_none() {
        return Err(ConfigError::ValidationError(
            "shopify.store is required".to_string(),
        ));
    }

    if config.shopify.access_token.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "shopify.access_token is required".to_string(),
        ));
    }

    if !is_api_version(&config.shopify.api_version) {
        return Err(ConfigError::ValidationError(format!(
            "shopify.api_version must look like YYYY-MM: {:?}",
            config.shopify.api_version
        )));
    }

    if config.activation.target_product_id.is_empty() {
        return Err(ConfigError::ValidationError(
            "activation.target_product_id is required".to_string(),
        ));
    }

    if config.activation.lookup_max_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "activation.lookup_max_attempts must be at least 1".to_string(),
        ));
    }

    Ok(())
}

fn is_api_version(version: &str) -> bool {
    match version.split_once('-') {
        Some((year, month)) => {
            year.len() == 4
                && month.len() == 2
                && year.chars().all(|c| c.is_ascii_digit())
                && month.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}
