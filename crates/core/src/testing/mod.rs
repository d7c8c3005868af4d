//! Testing utilities and mock implementations.
//!
//! This module provides a mock commerce platform and an instant sleeper so
//! the activation flow can be exercised without a real store or real waits.
//!
//! # Example
//!
//! ```rust,ignore
//! use activator_core::testing::{fixtures, MockCommercePlatform, RecordingSleeper};
//!
//! let platform = Arc::new(MockCommercePlatform::new());
//! let sleeper = Arc::new(RecordingSleeper::new());
//! let processor = ActivationProcessor::new(fixtures::activation_config(), platform.clone())
//!     .with_sleeper(sleeper.clone());
//! ```

mod mock_platform;
mod mock_sleeper;

pub use mock_platform::{MockCommercePlatform, RecordedPlatformCall};
pub use mock_sleeper::RecordingSleeper;

/// Test fixtures and helper functions.
pub mod fixtures {
    use serde_json::{json, Value};

    use crate::config::ActivationConfig;
    use crate::order::{LineItem, Order, OrderCustomer, ResourceId};
    use crate::platform::{Customer, CustomerGid, CustomerState};

    /// Product id the fixtures treat as the activation trigger.
    pub const TARGET_PRODUCT: u64 = 7_482_991_001;
    /// Any other product.
    pub const OTHER_PRODUCT: u64 = 7_482_991_002;

    /// Activation config targeting [`TARGET_PRODUCT`] with default retries.
    pub fn activation_config() -> ActivationConfig {
        ActivationConfig::new(TARGET_PRODUCT)
    }

    /// Create an order with an optional email and one line per product.
    pub fn order(id: u64, email: Option<&str>, products: &[u64]) -> Order {
        Order {
            id: ResourceId::from(id),
            email: email.map(str::to_string),
            contact_email: None,
            customer: None,
            line_items: products
                .iter()
                .map(|&product| LineItem {
                    product_id: Some(ResourceId::from(product)),
                    title: None,
                })
                .collect(),
        }
    }

    /// Create an order without an order-level email but with an embedded customer.
    pub fn order_with_customer(
        id: u64,
        customer_id: Option<u64>,
        customer_email: Option<&str>,
        products: &[u64],
    ) -> Order {
        let mut order = order(id, None, products);
        order.customer = Some(OrderCustomer {
            id: customer_id.map(ResourceId::from),
            email: customer_email.map(str::to_string),
        });
        order
    }

    /// Webhook body as Shopify would send it (numeric ids).
    pub fn order_json(id: u64, email: Option<&str>, products: &[u64]) -> Value {
        let line_items: Vec<Value> = products
            .iter()
            .map(|product| json!({ "id": product + 1, "product_id": product, "quantity": 1 }))
            .collect();

        json!({
            "id": id,
            "email": email,
            "currency": "USD",
            "line_items": line_items,
        })
    }

    /// Create a platform customer record.
    pub fn customer(n: u64, state: CustomerState) -> Customer {
        Customer {
            id: CustomerGid::new(format!("gid://shopify/Customer/{}", n)),
            email: Some(format!("customer{}@example.com", n)),
            state,
        }
    }
}
