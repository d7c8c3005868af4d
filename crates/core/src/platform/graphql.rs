//! Transport for the Shopify Admin GraphQL endpoint.
//!
//! One POST per document. Top-level `errors` are logged here and handed back
//! to the caller; field-level `userErrors` are left to the typed callers.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::PlatformError;
use crate::config::ShopifyConfig;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

/// Decoded response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// Entry of the top-level `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub path: Option<Vec<Value>>,
}

impl<T> GraphQlResponse<T> {
    /// Take `data`, failing when the platform returned none.
    pub fn into_data(self, operation: &str) -> Result<T, PlatformError> {
        match self.data {
            Some(data) => Ok(data),
            None => Err(PlatformError::EmptyResponse {
                operation: operation.to_string(),
                message: self
                    .errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join("; "),
            }),
        }
    }
}

fn error_suffix(errors: &[GraphQlError]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
    format!(" (GraphQL errors: {})", messages.join("; "))
}

/// Authenticated client for one store's GraphQL endpoint.
pub struct GraphQlClient {
    client: Client,
    endpoint: String,
    access_token: String,
}

impl GraphQlClient {
    pub fn new(config: &ShopifyConfig) -> Result<Self, PlatformError> {
        if config.access_token.is_empty() {
            return Err(PlatformError::NotConfigured(
                "Shopify access token is required".to_string(),
            ));
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.graphql_endpoint(),
            access_token: config.access_token.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute a query or mutation and decode the response envelope.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        document: &str,
        variables: Value,
    ) -> Result<GraphQlResponse<T>, PlatformError> {
        debug!(operation, endpoint = %self.endpoint, "GraphQL request");

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&GraphQlRequest {
                query: document,
                variables,
            })
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(PlatformError::Unauthorized(format!(
                "Shopify rejected the access token ({})",
                status.as_u16()
            )));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(PlatformError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlatformError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        // Untyped first so `errors` is logged even when `data` has an
        // unexpected shape (partial failures null out fields).
        let bytes = response.bytes().await?;
        let envelope: GraphQlResponse<Value> = serde_json::from_slice(&bytes).map_err(|e| {
            PlatformError::Parse(format!("Failed to parse {} response: {}", operation, e))
        })?;

        for error in &envelope.errors {
            warn!(
                operation,
                error = %error.message,
                path = ?error.path,
                "GraphQL error in response"
            );
        }

        let data = match envelope.data {
            None | Some(Value::Null) => None,
            Some(data) => Some(serde_json::from_value(data).map_err(|e| {
                PlatformError::Parse(format!(
                    "Failed to decode {} data: {}{}",
                    operation,
                    e,
                    error_suffix(&envelope.errors)
                ))
            })?),
        };

        Ok(GraphQlResponse {
            data,
            errors: envelope.errors,
        })
    }
}
