//! Order payloads as delivered by the `orders/create` webhook.
//!
//! Only the fields the activation flow reads are modelled; everything else in
//! the payload is ignored during decoding.

mod id;
mod types;

pub use id::ResourceId;
pub use types::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order payload is empty")]
    Empty,

    #[error("Malformed order payload: {0}")]
    Malformed(#[from] serde_json::Error),
}
