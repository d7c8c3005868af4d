use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use crate::order::ResourceId;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub shopify: ShopifyConfig,
    pub activation: ActivationConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path that receives `orders/create` deliveries (POST) and health probes (GET).
    #[serde(default = "default_webhook_path")]
    pub webhook_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            webhook_path: default_webhook_path(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    3000
}

fn default_webhook_path() -> String {
    "/order-create".to_string()
}

/// Shopify Admin API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShopifyConfig {
    /// Store hostname (e.g., "example.myshopify.com")
    pub store: String,
    /// Admin API access token, sent as `X-Shopify-Access-Token`
    pub access_token: String,
    /// Date-stamped Admin API version (default: 2025-10)
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default)]
    pub invite_method: InviteMethod,
    /// Base URL override, replaces `https://<store>` (useful for testing)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Per-request timeout. Unset means the HTTP client default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_api_version() -> String {
    "2025-10".to_string()
}

impl ShopifyConfig {
    /// Full URL of the Admin GraphQL endpoint.
    pub fn graphql_endpoint(&self) -> String {
        let base = match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => {
                let host = self
                    .store
                    .trim_start_matches("https://")
                    .trim_start_matches("http://")
                    .trim_end_matches('/');
                format!("https://{}", host)
            }
        };
        format!("{}/admin/api/{}/graphql.json", base, self.api_version)
    }
}

/// How a dormant customer gets invited.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InviteMethod {
    /// `customerSendAccountInviteEmail`: Shopify emails the invite.
    #[default]
    SendInviteEmail,
    /// `customerGenerateAccountActivationUrl`: only the URL is generated.
    ActivationUrl,
}

/// Activation flow configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActivationConfig {
    /// Product whose purchase triggers the activation invite.
    pub target_product_id: ResourceId,
    /// Customer lookups per order before giving up.
    #[serde(default = "default_lookup_attempts")]
    pub lookup_max_attempts: u32,
    /// Wait between customer lookups, in seconds.
    #[serde(default = "default_lookup_delay")]
    pub lookup_retry_delay_secs: u64,
}

fn default_lookup_attempts() -> u32 {
    3
}

fn default_lookup_delay() -> u64 {
    20
}

impl ActivationConfig {
    /// Config for the given product with default retry settings.
    pub fn new(target_product_id: impl Into<ResourceId>) -> Self {
        Self {
            target_product_id: target_product_id.into(),
            lookup_max_attempts: default_lookup_attempts(),
            lookup_retry_delay_secs: default_lookup_delay(),
        }
    }

    pub fn lookup_retry_delay(&self) -> Duration {
        Duration::from_secs(self.lookup_retry_delay_secs)
    }
}

/// Sanitized config for logging (access token redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub shopify: SanitizedShopifyConfig,
    pub activation: ActivationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedShopifyConfig {
    pub endpoint: String,
    pub access_token_configured: bool,
    pub invite_method: InviteMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            shopify: SanitizedShopifyConfig {
                endpoint: config.shopify.graphql_endpoint(),
                access_token_configured: !config.shopify.access_token.is_empty(),
                invite_method: config.shopify.invite_method,
                timeout_secs: config.shopify.timeout_secs,
            },
            activation: config.activation.clone(),
        }
    }
}
