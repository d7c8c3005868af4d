//! Mock commerce platform for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::platform::{
    CommercePlatform, Customer, CustomerGid, InviteResult, PlatformError,
};

/// A recorded platform call for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedPlatformCall {
    FindCustomerByEmail { email: String },
    FindCustomerById { id: CustomerGid },
    SendAccountInvite { id: CustomerGid },
}

impl RecordedPlatformCall {
    pub fn is_lookup(&self) -> bool {
        !matches!(self, RecordedPlatformCall::SendAccountInvite { .. })
    }
}

/// Mock implementation of the CommercePlatform trait.
///
/// Provides controllable behavior for testing:
/// - Script the result of each customer lookup, in order
/// - Configure the invite result
/// - Track calls for assertions
/// - Simulate failures and stalled calls
///
/// # Example
///
/// ```rust,ignore
/// use activator_core::testing::{MockCommercePlatform, fixtures};
///
/// let platform = MockCommercePlatform::new();
///
/// // Not replicated yet on the first lookup, found on the second
/// platform.push_lookup(None).await;
/// platform.push_lookup(Some(fixtures::customer(1, CustomerState::Disabled))).await;
/// ```
#[derive(Debug)]
pub struct MockCommercePlatform {
    /// Results returned by successive lookups; empty means "not found".
    lookups: Arc<RwLock<VecDeque<Option<Customer>>>>,
    /// Result returned by every invite.
    invite_result: Arc<RwLock<InviteResult>>,
    /// Recorded calls.
    calls: Arc<RwLock<Vec<RecordedPlatformCall>>>,
    /// If set, the next call will fail with this error.
    next_error: Arc<RwLock<Option<PlatformError>>>,
    /// If set, the next invite will fail with this error.
    invite_error: Arc<RwLock<Option<PlatformError>>>,
    /// When true, calls are recorded and then never complete.
    stalled: Arc<AtomicBool>,
}

impl Default for MockCommercePlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCommercePlatform {
    /// Create a mock where no customer exists and invites succeed.
    pub fn new() -> Self {
        Self {
            lookups: Arc::new(RwLock::new(VecDeque::new())),
            invite_result: Arc::new(RwLock::new(InviteResult::default())),
            calls: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            invite_error: Arc::new(RwLock::new(None)),
            stalled: Arc::new(AtomicBool::new(false)),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Queue the result of the next unanswered lookup.
    pub async fn push_lookup(&self, customer: Option<Customer>) {
        self.lookups.write().await.push_back(customer);
    }

    /// Replace all queued lookup results.
    pub async fn set_lookups(&self, results: Vec<Option<Customer>>) {
        *self.lookups.write().await = results.into();
    }

    /// Set the result returned by invites.
    pub async fn set_invite_result(&self, result: InviteResult) {
        *self.invite_result.write().await = result;
    }

    /// Make every call hang after being recorded.
    pub fn set_stalled(&self, stalled: bool) {
        self.stalled.store(stalled, Ordering::SeqCst);
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next call to fail with the given error.
    pub async fn set_next_error(&self, error: PlatformError) {
        *self.next_error.write().await = Some(error);
    }

    /// Configure the next invite to fail, leaving lookups untouched.
    pub async fn set_invite_error(&self, error: PlatformError) {
        *self.invite_error.write().await = Some(error);
    }

    async fn take_error(&self) -> Option<PlatformError> {
        self.next_error.write().await.take()
    }

    // =========================================================================
    // Call Recording
    // =========================================================================

    /// Get all recorded calls.
    pub async fn recorded_calls(&self) -> Vec<RecordedPlatformCall> {
        self.calls.read().await.clone()
    }

    /// Total number of calls of any kind.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Number of customer lookups performed.
    pub async fn lookup_count(&self) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| c.is_lookup())
            .count()
    }

    /// Customers an invite was issued for.
    pub async fn invited(&self) -> Vec<CustomerGid> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|c| match c {
                RecordedPlatformCall::SendAccountInvite { id } => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of invites issued.
    pub async fn invite_count(&self) -> usize {
        self.invited().await.len()
    }

    /// Wait until at least `count` calls were recorded.
    ///
    /// Returns false if `timeout` elapses first.
    pub async fn wait_for_calls(&self, count: usize, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if self.call_count().await >= count {
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    async fn record(&self, call: RecordedPlatformCall) {
        self.calls.write().await.push(call);
        if self.stalled.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
    }

    async fn next_lookup(&self) -> Option<Customer> {
        self.lookups.write().await.pop_front().flatten()
    }
}

#[async_trait]
impl CommercePlatform for MockCommercePlatform {
    async fn find_customer_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Customer>, PlatformError> {
        self.record(RecordedPlatformCall::FindCustomerByEmail {
            email: email.to_string(),
        })
        .await;

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        Ok(self.next_lookup().await)
    }

    async fn find_customer_by_id(
        &self,
        id: &CustomerGid,
    ) -> Result<Option<Customer>, PlatformError> {
        self.record(RecordedPlatformCall::FindCustomerById { id: id.clone() })
            .await;

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        Ok(self.next_lookup().await)
    }

    async fn send_account_invite(&self, id: &CustomerGid) -> Result<InviteResult, PlatformError> {
        self.record(RecordedPlatformCall::SendAccountInvite { id: id.clone() })
            .await;

        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        if let Some(err) = self.invite_error.write().await.take() {
            return Err(err);
        }

        Ok(self.invite_result.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::CustomerState;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_lookups_are_served_in_order() {
        let platform = MockCommercePlatform::new();
        platform
            .set_lookups(vec![None, Some(fixtures::customer(2, CustomerState::Enabled))])
            .await;

        assert!(platform.find_customer_by_email("a@x.com").await.unwrap().is_none());
        let found = platform.find_customer_by_email("a@x.com").await.unwrap();
        assert_eq!(found.unwrap().id.as_str(), "gid://shopify/Customer/2");
        assert!(platform.find_customer_by_email("a@x.com").await.unwrap().is_none());
        assert_eq!(platform.lookup_count().await, 3);
    }

    #[tokio::test]
    async fn test_error_injection_applies_once() {
        let platform = MockCommercePlatform::new();
        platform.set_next_error(PlatformError::RateLimited).await;

        assert!(platform.find_customer_by_email("a@x.com").await.is_err());
        assert!(platform.find_customer_by_email("a@x.com").await.is_ok());
    }

    #[tokio::test]
    async fn test_invites_are_recorded() {
        let platform = MockCommercePlatform::new();
        let id = CustomerGid::new("gid://shopify/Customer/3");

        let result = platform.send_account_invite(&id).await.unwrap();

        assert!(result.is_success());
        assert_eq!(platform.invited().await, vec![id]);
        assert_eq!(platform.lookup_count().await, 0);
    }

    #[tokio::test]
    async fn test_wait_for_calls_times_out() {
        let platform = MockCommercePlatform::new();
        assert!(!platform.wait_for_calls(1, Duration::from_millis(20)).await);
    }
}
