//! Order eligibility for the activation invite.

use crate::order::{Order, ResourceId};
use crate::platform::CustomerGid;

/// How the order's customer will be looked up on the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contact {
    Email(String),
    /// Order has no email but embeds a customer reference.
    CustomerId(CustomerGid),
}

/// Result of filtering an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    Eligible(Contact),
    /// None of the line items is the target product.
    NoTargetProduct,
    /// Target product present but no email or customer reference.
    NoContact,
}

/// Decide whether an order should go through customer activation.
pub fn check_eligibility(order: &Order, target_product: &ResourceId) -> Eligibility {
    if !order.contains_product(target_product) {
        return Eligibility::NoTargetProduct;
    }

    match resolve_contact(order) {
        Some(contact) => Eligibility::Eligible(contact),
        None => Eligibility::NoContact,
    }
}

/// Email from the order, its contact email, or the embedded customer, in
/// that order; otherwise the embedded customer's id.
pub fn resolve_contact(order: &Order) -> Option<Contact> {
    let customer = order.customer.as_ref();

    let email = [
        order.email.as_deref(),
        order.contact_email.as_deref(),
        customer.and_then(|c| c.email.as_deref()),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .find(|email| !email.is_empty());

    if let Some(email) = email {
        return Some(Contact::Email(email.to_string()));
    }

    customer
        .and_then(|c| c.id.as_ref())
        .filter(|id| !id.is_empty())
        .map(|id| Contact::CustomerId(CustomerGid::from_customer_id(id)))
}
