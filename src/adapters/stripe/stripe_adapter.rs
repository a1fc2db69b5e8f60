//! Stripe checkout adapter.
//!
//! Creates one-off Checkout Sessions for listing purchases. The session
//! carries `userId`, `itemId` and `pricePlan` as metadata.
//!
//! # Configuration
//!
//! ```ignore
//! let adapter = StripeCheckoutAdapter::new(StripeConfig::new(secret_key));
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::payment::PaymentProviderKind;
use crate::ports::{CheckoutProvider, CheckoutRequest, CheckoutSession, PaymentError, PaymentErrorCode};

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,
}

impl StripeConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            api_base_url: "https://api.stripe.com".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Checkout session as returned by `POST /v1/checkout/sessions`.
#[derive(Debug, Deserialize)]
struct StripeCheckoutSession {
    id: String,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Stripe checkout provider.
pub struct StripeCheckoutAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripeCheckoutAdapter {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Form parameters for a one-off payment session.
    fn checkout_params(request: &CheckoutRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("mode", "payment".to_string()),
            ("line_items[0][price]", request.product_ref.clone()),
            ("line_items[0][quantity]", "1".to_string()),
            ("success_url", request.success_url.clone()),
            ("metadata[userId]", request.user_id.to_string()),
            ("metadata[itemId]", request.item_id.to_string()),
            ("metadata[pricePlan]", request.price_plan.to_string()),
        ];
        if let Some(cancel_url) = &request.cancel_url {
            params.push(("cancel_url", cancel_url.clone()));
        }
        if let Some(email) = &request.customer_email {
            params.push(("customer_email", email.clone()));
        }
        params
    }
}

/// Builds a `PaymentError` from a failed Stripe response body.
fn stripe_error(status: u16, body: &str) -> PaymentError {
    let code = PaymentErrorCode::from_status(status);
    match serde_json::from_str::<StripeErrorBody>(body) {
        Ok(parsed) => {
            let message = parsed
                .error
                .message
                .unwrap_or_else(|| format!("Stripe API error ({})", status));
            let error = PaymentError::new(code, message);
            match parsed.error.code {
                Some(provider_code) => error.with_provider_code(provider_code),
                None => error,
            }
        }
        Err(_) => PaymentError::new(code, format!("Stripe API error ({}): {}", status, body)),
    }
}

#[async_trait]
impl CheckoutProvider for StripeCheckoutAdapter {
    fn kind(&self) -> PaymentProviderKind {
        PaymentProviderKind::Stripe
    }

    async fn create_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);
        let params = Self::checkout_params(&request);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %error_text, "Stripe checkout failed");
            return Err(stripe_error(status.as_u16(), &error_text));
        }

        let session: StripeCheckoutSession = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Stripe response: {}", e))
        })?;

        let url = session
            .url
            .ok_or_else(|| PaymentError::provider("Stripe session has no checkout URL"))?;

        tracing::info!(
            session_id = %session.id,
            item_id = %request.item_id,
            plan = %request.price_plan,
            "Stripe checkout session created"
        );

        Ok(CheckoutSession {
            id: session.id,
            url,
        })
    }
}
