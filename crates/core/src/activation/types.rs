use serde::Serialize;

use crate::platform::{CustomerGid, CustomerState, UserError};

/// Where processing of one order stopped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActivationOutcome {
    /// Order does not contain the target product.
    NoTargetProduct,
    /// Order has the target product but nothing to identify the customer by.
    NoContact,
    /// Every lookup came back empty.
    CustomerNotFound { attempts: u32 },
    /// A lookup call itself failed; no further attempts were made.
    LookupFailed { attempt: u32, error: String },
    /// Customer account is not disabled, so no invite is needed.
    AlreadyActive {
        customer_id: CustomerGid,
        state: CustomerState,
    },
    /// Invite accepted by the platform.
    Invited {
        customer_id: CustomerGid,
        #[serde(skip_serializing_if = "Option::is_none")]
        activation_url: Option<String>,
    },
    /// Platform answered the invite with user errors.
    InviteRejected {
        customer_id: CustomerGid,
        errors: Vec<UserError>,
    },
    /// Invite call failed.
    InviteFailed {
        customer_id: CustomerGid,
        error: String,
    },
}

impl ActivationOutcome {
    /// Short name for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ActivationOutcome::NoTargetProduct => "no_target_product",
            ActivationOutcome::NoContact => "no_contact",
            ActivationOutcome::CustomerNotFound { .. } => "customer_not_found",
            ActivationOutcome::LookupFailed { .. } => "lookup_failed",
            ActivationOutcome::AlreadyActive { .. } => "already_active",
            ActivationOutcome::Invited { .. } => "invited",
            ActivationOutcome::InviteRejected { .. } => "invite_rejected",
            ActivationOutcome::InviteFailed { .. } => "invite_failed",
        }
    }

    pub fn is_invited(&self) -> bool {
        matches!(self, ActivationOutcome::Invited { .. })
    }

    /// Whether the order was skipped as ineligible (not an error).
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            ActivationOutcome::NoTargetProduct
                | ActivationOutcome::NoContact
                | ActivationOutcome::AlreadyActive { .. }
        )
    }
}
