use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, info_span, warn, Instrument};

use super::sleeper::{Sleeper, TokioSleeper};
use super::types::ActivationOutcome;
use crate::config::ActivationConfig;
use crate::eligibility::{check_eligibility, Contact, Eligibility};
use crate::order::Order;
use crate::platform::{CommercePlatform, Customer};

/// Runs the activation flow for individual orders.
pub struct ActivationProcessor {
    config: ActivationConfig,
    platform: Arc<dyn CommercePlatform>,
    sleeper: Arc<dyn Sleeper>,
}

impl ActivationProcessor {
    pub fn new(config: ActivationConfig, platform: Arc<dyn CommercePlatform>) -> Self {
        Self {
            config,
            platform,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Replace the wait between lookups (tests use an instant sleeper).
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn config(&self) -> &ActivationConfig {
        &self.config
    }

    /// Process the order on a detached task.
    ///
    /// The returned handle resolves once processing is over and never
    /// carries an error: a panic inside the flow is logged here. Callers
    /// that only need to acknowledge the webhook drop the handle.
    pub fn dispatch(self: &Arc<Self>, order: Order) -> JoinHandle<()> {
        let processor = Arc::clone(self);
        let order_id = order.id.clone();
        let span = info_span!("order", order_id = %order.id);

        let task = tokio::spawn(
            async move {
                processor.process(order).await;
            }
            .instrument(span),
        );

        tokio::spawn(async move {
            if let Err(e) = task.await {
                error!(order_id = %order_id, error = %e, "Order processing aborted");
            }
        })
    }

    /// Run the whole flow for one order and report where it stopped.
    pub async fn process(&self, order: Order) -> ActivationOutcome {
        info!(
            order_id = %order.id,
            line_items = order.line_items.len(),
            "Order received"
        );

        let outcome = self.run(&order).await;

        if outcome.is_skip() || outcome.is_invited() {
            info!(order_id = %order.id, outcome = outcome.kind(), "Order processing finished");
        } else {
            warn!(order_id = %order.id, outcome = outcome.kind(), "Order processing finished without invite");
        }
        outcome
    }

    async fn run(&self, order: &Order) -> ActivationOutcome {
        let contact = match check_eligibility(order, &self.config.target_product_id) {
            Eligibility::Eligible(contact) => contact,
            Eligibility::NoTargetProduct => {
                info!(
                    target_product_id = %self.config.target_product_id,
                    "Target product not found, skipping"
                );
                return ActivationOutcome::NoTargetProduct;
            }
            Eligibility::NoContact => {
                warn!("Order has target product but no email or customer, skipping");
                return ActivationOutcome::NoContact;
            }
        };

        let customer = match self.resolve_customer(&contact).await {
            Ok(customer) => customer,
            Err(outcome) => return outcome,
        };

        self.invite(customer).await
    }

    /// Poll the platform until the customer shows up or attempts run out.
    ///
    /// The customer record created by a checkout is not always queryable
    /// when the webhook fires, hence the fixed wait between attempts.
    ///
    /// Only "not found" is retried. A failed lookup call ends the flow on
    /// that attempt with [`ActivationOutcome::LookupFailed`].
    async fn resolve_customer(&self, contact: &Contact) -> Result<Customer, ActivationOutcome> {
        let max_attempts = self.config.lookup_max_attempts.max(1);
        let delay = self.config.lookup_retry_delay();

        for attempt in 1..=max_attempts {
            if attempt > 1 {
                debug!(attempt, delay_secs = delay.as_secs(), "Waiting before next lookup");
                self.sleeper.sleep(delay).await;
            }

            let found = match contact {
                Contact::Email(email) => self.platform.find_customer_by_email(email).await,
                Contact::CustomerId(id) => self.platform.find_customer_by_id(id).await,
            };

            match found {
                Ok(Some(customer)) => {
                    info!(
                        attempt,
                        customer_id = %customer.id,
                        state = %customer.state,
                        "Customer found"
                    );
                    return Ok(customer);
                }
                Ok(None) => {
                    info!(attempt, max_attempts, "Customer not found yet");
                }
                Err(e) => {
                    error!(attempt, error = %e, "Customer lookup failed");
                    return Err(ActivationOutcome::LookupFailed {
                        attempt,
                        error: e.to_string(),
                    });
                }
            }
        }

        warn!(attempts = max_attempts, "Customer lookup exhausted retries, no invite sent");
        Err(ActivationOutcome::CustomerNotFound {
            attempts: max_attempts,
        })
    }

    async fn invite(&self, customer: Customer) -> ActivationOutcome {
        if !customer.state.is_dormant() {
            info!(
                customer_id = %customer.id,
                state = %customer.state,
                "Customer account not disabled, no invite needed"
            );
            return ActivationOutcome::AlreadyActive {
                customer_id: customer.id,
                state: customer.state,
            };
        }

        match self.platform.send_account_invite(&customer.id).await {
            Ok(result) if result.is_success() => {
                info!(
                    customer_id = %customer.id,
                    activation_url = ?result.activation_url,
                    "Account invite sent"
                );
                ActivationOutcome::Invited {
                    customer_id: customer.id,
                    activation_url: result.activation_url,
                }
            }
            Ok(result) => {
                for user_error in &result.user_errors {
                    warn!(customer_id = %customer.id, error = %user_error, "Invite rejected");
                }
                ActivationOutcome::InviteRejected {
                    customer_id: customer.id,
                    errors: result.user_errors,
                }
            }
            Err(e) => {
                error!(customer_id = %customer.id, error = %e, "Invite request failed");
                ActivationOutcome::InviteFailed {
                    customer_id: customer.id,
                    error: e.to_string(),
                }
            }
        }
    }
}
