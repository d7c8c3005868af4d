//! Commerce platform integration.
//!
//! The activation flow talks to the platform through [`CommercePlatform`].
//! [`ShopifyClient`] implements it on top of the Admin GraphQL API.

mod graphql;
mod shopify;
mod types;

pub use graphql::{GraphQlClient, GraphQlError, GraphQlResponse};
pub use shopify::ShopifyClient;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when calling the platform.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Access token missing or rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Platform throttled the request.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Non-success HTTP status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Response carried no `data`, only top-level errors.
    #[error("Empty {operation} response: {message}")]
    EmptyResponse { operation: String, message: String },

    /// Client not configured (missing access token, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Operations the activation flow needs from the platform.
#[async_trait]
pub trait CommercePlatform: Send + Sync {
    /// First customer whose email matches, if any.
    async fn find_customer_by_email(&self, email: &str)
        -> Result<Option<Customer>, PlatformError>;

    /// Customer by global id, if it exists yet.
    async fn find_customer_by_id(&self, id: &CustomerGid)
        -> Result<Option<Customer>, PlatformError>;

    /// Issue one account invite for the customer.
    async fn send_account_invite(&self, id: &CustomerGid) -> Result<InviteResult, PlatformError>;
}
