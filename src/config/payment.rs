//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Creem preferred, Stripe fallback)
///
/// Every field is optional: a provider whose key is absent is simply not
/// offered, and checkout falls through to the other one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Creem API key
    pub creem_api_key: Option<String>,

    /// Creem webhook signing secret
    pub creem_webhook_secret: Option<String>,

    /// Use the Creem test API host
    #[serde(default)]
    pub creem_test_mode: bool,

    /// Creem product ID for the pro plan
    pub creem_pro_product_id: Option<String>,

    /// Creem product ID for the sponsor plan
    pub creem_sponsor_product_id: Option<String>,

    /// Stripe secret key
    pub stripe_secret_key: Option<String>,

    /// Stripe price ID for the pro plan
    pub stripe_pro_price_id: Option<String>,

    /// Stripe price ID for the sponsor plan
    pub stripe_sponsor_price_id: Option<String>,
}

impl PaymentConfig {
    pub fn creem_api_key(&self) -> Option<&str> {
        non_empty(&self.creem_api_key)
    }

    pub fn creem_webhook_secret(&self) -> Option<&str> {
        non_empty(&self.creem_webhook_secret)
    }

    pub fn stripe_secret_key(&self) -> Option<&str> {
        non_empty(&self.stripe_secret_key)
    }

    /// Creem API host for the configured mode.
    pub fn creem_base_url(&self) -> &'static str {
        if self.creem_test_mode {
            "https://test-api.creem.io"
        } else {
            "https://api.creem.io"
        }
    }

    /// Check if using Stripe test mode
    pub fn is_stripe_test_mode(&self) -> bool {
        self.stripe_secret_key()
            .map(|k| k.starts_with("sk_test_"))
            .unwrap_or(false)
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(key) = self.stripe_secret_key() {
            // Verify key prefixes for safety
            if !key.starts_with("sk_") {
                return Err(ValidationError::InvalidStripeKey);
            }
        }
        if let Some(key) = self.creem_api_key() {
            if !key.starts_with("creem_") {
                return Err(ValidationError::InvalidCreemKey);
            }
        }
        Ok(())
    }
}

pub(super) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
