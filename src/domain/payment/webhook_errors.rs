//! Webhook error types for Creem webhook handling.

use thiserror::Error;

/// Errors that occur while verifying or reconciling a webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// Body or `creem-signature` header absent.
    #[error("Missing body or signature")]
    MissingSignature,

    /// Webhook signature verification failed.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Failed to parse the webhook payload.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// No webhook secret is configured, so nothing can be verified.
    #[error("Webhook verification is not configured")]
    NotConfigured,

    /// Reconciling a verified event failed; the provider should redeliver.
    #[error("Webhook processing failed: {0}")]
    Processing(String),
}

impl WebhookError {
    /// True when a redelivery of the same payload could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::Processing(_) | WebhookError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_processing_failures_are_retryable() {
        assert!(WebhookError::Processing("store down".to_string()).is_retryable());
        assert!(!WebhookError::InvalidSignature.is_retryable());
        assert!(!WebhookError::ParseError("bad".to_string()).is_retryable());
    }
}
