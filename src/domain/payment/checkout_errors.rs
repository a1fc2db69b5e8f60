//! Checkout creation errors.

use thiserror::Error;

use super::PaymentProviderKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    #[error("Invalid price plan: {0}")]
    UnknownPricePlan(String),

    #[error("{0} payments are not configured")]
    ProviderNotConfigured(PaymentProviderKind),

    /// The provider call failed; details are logged, not returned.
    #[error("Failed to create checkout session: {0}")]
    CreationFailed(String),
}
