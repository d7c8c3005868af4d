use serde::{Deserialize, Deserializer, Serialize};

use super::{OrderError, ResourceId};

/// An order as received from the `orders/create` webhook.
///
/// Only `id` is guaranteed. Every other field may be missing or `null`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Order {
    pub id: ResourceId,
    #[serde(default)]
    pub email: Option<String>,
    /// Checkout contact email, present on some orders without `email`.
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub customer: Option<OrderCustomer>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub line_items: Vec<LineItem>,
}

/// Customer reference embedded in the order payload.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OrderCustomer {
    #[serde(default)]
    pub id: Option<ResourceId>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A single order line.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LineItem {
    /// `null` for custom line items that are not backed by a product.
    #[serde(default)]
    pub product_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Order {
    /// Decode a raw webhook body.
    pub fn from_slice(body: &[u8]) -> Result<Self, OrderError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(OrderError::Empty);
        }
        Ok(serde_json::from_slice(body)?)
    }

    /// Whether any line item references the given product.
    pub fn contains_product(&self, product_id: &ResourceId) -> bool {
        self.line_items
            .iter()
            .any(|item| item.product_id.as_ref() == Some(product_id))
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_payload() {
        let body = br#"{
            "id": 820982911946154508,
            "email": "jon@example.com",
            "contact_email": "jon@example.com",
            "total_price": "199.00",
            "customer": { "id": 115310627314723954, "email": "jon@example.com", "state": "disabled" },
            "line_items": [
                { "id": 1, "product_id": 632910392, "title": "IPod Nano" },
                { "id": 2, "product_id": null, "title": "Gift wrap" }
            ]
        }"#;

        let order = Order::from_slice(body).unwrap();
        assert_eq!(order.id.as_str(), "820982911946154508");
        assert_eq!(order.email.as_deref(), Some("jon@example.com"));
        assert_eq!(order.line_items.len(), 2);
        assert_eq!(order.line_items[1].product_id, None);
        let customer = order.customer.unwrap();
        assert_eq!(customer.id.unwrap().as_str(), "115310627314723954");
    }

    #[test]
    fn test_decode_minimal_payload() {
        let order = Order::from_slice(br#"{"id": 1}"#).unwrap();
        assert!(order.email.is_none());
        assert!(order.customer.is_none());
        assert!(order.line_items.is_empty());
    }

    #[test]
    fn test_null_line_items_decode_as_empty() {
        let order = Order::from_slice(br#"{"id": 1, "line_items": null}"#).unwrap();
        assert!(order.line_items.is_empty());
    }

    #[test]
    fn test_missing_id_is_malformed() {
        let result = Order::from_slice(br#"{"email": "a@x.com"}"#);
        assert!(matches!(result, Err(OrderError::Malformed(_))));
    }

    #[test]
    fn test_empty_body() {
        assert!(matches!(Order::from_slice(b""), Err(OrderError::Empty)));
        assert!(matches!(Order::from_slice(b"  \n"), Err(OrderError::Empty)));
    }

    #[test]
    fn test_contains_product_ignores_wire_type() {
        let order =
            Order::from_slice(br#"{"id": 1, "line_items": [{"product_id": "555"}]}"#).unwrap();
        assert!(order.contains_product(&ResourceId::from(555u64)));
        assert!(!order.contains_product(&ResourceId::from(556u64)));
    }
}
