//! Mock checkout provider for testing.
//!
//! Records every request and returns a canned session or an injected error.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::payment::PaymentProviderKind;
use crate::ports::{CheckoutProvider, CheckoutRequest, CheckoutSession, PaymentError};

/// Mock checkout provider for testing.
///
/// # Example
///
/// ```ignore
/// let creem = MockCheckoutProvider::new(PaymentProviderKind::Creem);
/// creem.set_error(PaymentError::network("down"));
/// assert_eq!(creem.calls().len(), 0);
/// ```
#[derive(Clone)]
pub struct MockCheckoutProvider {
    kind: PaymentProviderKind,
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    next_error: Option<PaymentError>,
    calls: Vec<CheckoutRequest>,
}

impl MockCheckoutProvider {
    pub fn new(kind: PaymentProviderKind) -> Self {
        Self {
            kind,
            inner: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Fail the next call with this error.
    pub fn set_error(&self, error: PaymentError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Requests received so far.
    pub fn calls(&self) -> Vec<CheckoutRequest> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn was_called(&self) -> bool {
        !self.inner.lock().unwrap().calls.is_empty()
    }
}

#[async_trait]
impl CheckoutProvider for MockCheckoutProvider {
    fn kind(&self) -> PaymentProviderKind {
        self.kind
    }

    async fn create_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let mut state = self.inner.lock().unwrap();
        let n = state.calls.len() + 1;
        state.calls.push(request);
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }
        Ok(CheckoutSession {
            id: format!("{}_cs_{}", self.kind, n),
            url: format!("https://checkout.{}.test/session/{}", self.kind, n),
        })
    }
}
