//! Shopify Admin GraphQL implementation of [`CommercePlatform`].

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::graphql::GraphQlClient;
use super::types::{Customer, CustomerGid, InviteResult, UserError};
use super::{CommercePlatform, PlatformError};
use crate::config::{InviteMethod, ShopifyConfig};

const CUSTOMER_BY_EMAIL: &str = r#"
query customerByEmail($query: String!) {
  customers(first: 1, query: $query) {
    nodes {
      id
      email
      state
    }
  }
}
"#;

const CUSTOMER_BY_ID: &str = r#"
query customerById($id: ID!) {
  customer(id: $id) {
    id
    email
    state
  }
}
"#;

const SEND_INVITE_EMAIL: &str = r#"
mutation customerSendAccountInviteEmail($customerId: ID!) {
  customerSendAccountInviteEmail(customerId: $customerId) {
    customer {
      id
    }
    userErrors {
      field
      message
    }
  }
}
"#;

const GENERATE_ACTIVATION_URL: &str = r#"
mutation customerGenerateAccountActivationUrl($customerId: ID!) {
  customerGenerateAccountActivationUrl(customerId: $customerId) {
    accountActivationUrl
    userErrors {
      field
      message
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct CustomersData {
    /// `null` when the search itself failed; the reason is in `errors`.
    customers: Option<CustomerConnection>,
}

#[derive(Debug, Deserialize)]
struct CustomerConnection {
    #[serde(default)]
    nodes: Vec<Customer>,
}

#[derive(Debug, Deserialize)]
struct CustomerData {
    customer: Option<Customer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendInviteData {
    customer_send_account_invite_email: Option<MutationPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivationUrlData {
    customer_generate_account_activation_url: Option<MutationPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MutationPayload {
    #[serde(default)]
    account_activation_url: Option<String>,
    #[serde(default)]
    user_errors: Vec<UserError>,
}

impl MutationPayload {
    fn into_result(self) -> InviteResult {
        InviteResult {
            user_errors: self.user_errors,
            activation_url: self.account_activation_url,
        }
    }
}

/// Shopify Admin API client.
pub struct ShopifyClient {
    graphql: GraphQlClient,
    invite_method: InviteMethod,
}

impl ShopifyClient {
    /// Create a new Shopify client.
    pub fn new(config: &ShopifyConfig) -> Result<Self, PlatformError> {
        Ok(Self {
            graphql: GraphQlClient::new(config)?,
            invite_method: config.invite_method,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.graphql.endpoint()
    }
}

/// Customer search expression matching one exact email address.
fn email_search_query(email: &str) -> String {
    let escaped = email.replace('\\', "\\\\").replace('"', "\\\"");
    format!("email:\"{}\"", escaped)
}

/// A mutation payload of `null` means the platform refused the call outright.
fn missing_payload(operation: &str) -> PlatformError {
    PlatformError::EmptyResponse {
        operation: operation.to_string(),
        message: "mutation payload was null".to_string(),
    }
}

#[async_trait]
impl CommercePlatform for ShopifyClient {
    async fn find_customer_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Customer>, PlatformError> {
        debug!(email, "Shopify customer search");

        let data: CustomersData = self
            .graphql
            .execute(
                "customerByEmail",
                CUSTOMER_BY_EMAIL,
                json!({ "query": email_search_query(email) }),
            )
            .await?
            .into_data("customerByEmail")?;

        Ok(data
            .customers
            .and_then(|connection| connection.nodes.into_iter().next()))
    }

    async fn find_customer_by_id(
        &self,
        id: &CustomerGid,
    ) -> Result<Option<Customer>, PlatformError> {
        debug!(customer_id = %id, "Shopify customer fetch");

        let data: CustomerData = self
            .graphql
            .execute("customerById", CUSTOMER_BY_ID, json!({ "id": id }))
            .await?
            .into_data("customerById")?;

        Ok(data.customer)
    }

    async fn send_account_invite(&self, id: &CustomerGid) -> Result<InviteResult, PlatformError> {
        let variables = json!({ "customerId": id });

        match self.invite_method {
            InviteMethod::SendInviteEmail => {
                let operation = "customerSendAccountInviteEmail";
                let data: SendInviteData = self
                    .graphql
                    .execute(operation, SEND_INVITE_EMAIL, variables)
                    .await?
                    .into_data(operation)?;
                data.customer_send_account_invite_email
                    .map(MutationPayload::into_result)
                    .ok_or_else(|| missing_payload(operation))
            }
            InviteMethod::ActivationUrl => {
                let operation = "customerGenerateAccountActivationUrl";
                let data: ActivationUrlData = self
                    .graphql
                    .execute(operation, GENERATE_ACTIVATION_URL, variables)
                    .await?
                    .into_data(operation)?;
                data.customer_generate_account_activation_url
                    .map(MutationPayload::into_result)
                    .ok_or_else(|| missing_payload(operation))
            }
        }
    }
}
