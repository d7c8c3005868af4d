use serde::{Deserialize, Serialize};
use std::fmt;

use crate::order::ResourceId;

/// Opaque Shopify global id of a customer (`gid://shopify/Customer/...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerGid(String);

impl CustomerGid {
    pub fn new(gid: impl Into<String>) -> Self {
        Self(gid.into())
    }

    /// Global id for a numeric customer id taken from a webhook payload.
    pub fn from_customer_id(id: &ResourceId) -> Self {
        Self(format!("gid://shopify/Customer/{}", id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerGid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account lifecycle state of a customer.
///
/// GraphQL returns upper case (`DISABLED`), webhook payloads lower case;
/// parsing ignores case and keeps unknown values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CustomerState {
    /// No account yet; the only state that gets an invite.
    Disabled,
    Enabled,
    Invited,
    Declined,
    Other(String),
}

impl CustomerState {
    pub fn is_dormant(&self) -> bool {
        matches!(self, CustomerState::Disabled)
    }

    pub fn as_str(&self) -> &str {
        match self {
            CustomerState::Disabled => "DISABLED",
            CustomerState::Enabled => "ENABLED",
            CustomerState::Invited => "INVITED",
            CustomerState::Declined => "DECLINED",
            CustomerState::Other(s) => s,
        }
    }
}

impl From<String> for CustomerState {
    fn from(s: String) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "DISABLED" => CustomerState::Disabled,
            "ENABLED" => CustomerState::Enabled,
            "INVITED" => CustomerState::Invited,
            "DECLINED" => CustomerState::Declined,
            _ => CustomerState::Other(s),
        }
    }
}

impl From<CustomerState> for String {
    fn from(state: CustomerState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for CustomerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer record owned by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerGid,
    #[serde(default)]
    pub email: Option<String>,
    pub state: CustomerState,
}

/// Field-level error returned inside a successful mutation response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(path) if !path.is_empty() => write!(f, "{}: {}", path.join("."), self.message),
            _ => f.write_str(&self.message),
        }
    }
}

/// Result of an invite mutation that reached the platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InviteResult {
    pub user_errors: Vec<UserError>,
    /// Only set when invites are issued as activation URLs.
    pub activation_url: Option<String>,
}

impl InviteResult {
    pub fn is_success(&self) -> bool {
        self.user_errors.is_empty()
    }
}
