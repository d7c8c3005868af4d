//! Customer activation flow.
//!
//! For each accepted order: filter for the target product, resolve the
//! customer with bounded retries, and invite the customer if the account is
//! still disabled. Runs detached from the webhook request.

mod processor;
mod sleeper;
mod types;

pub use processor::ActivationProcessor;
pub use sleeper::{Sleeper, TokioSleeper};
pub use types::ActivationOutcome;
