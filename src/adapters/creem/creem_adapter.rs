//! Creem checkout adapter.
//!
//! `POST {base}/v1/checkouts` with an `x-api-key` header. Test mode talks to
//! the sandbox host.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::payment::PaymentProviderKind;
use crate::ports::{CheckoutProvider, CheckoutRequest, CheckoutSession, PaymentError, PaymentErrorCode};

/// Creem API configuration.
#[derive(Clone)]
pub struct CreemConfig {
    api_key: SecretString,
    api_base_url: String,
}

impl CreemConfig {
    /// `base_url` is `https://api.creem.io` or `https://test-api.creem.io`.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            api_base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateCheckoutBody<'a> {
    product_id: &'a str,
    success_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer: Option<CustomerBody<'a>>,
    metadata: MetadataBody<'a>,
}

#[derive(Debug, Serialize)]
struct CustomerBody<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct MetadataBody<'a> {
    #[serde(rename = "userId")]
    user_id: &'a str,
    #[serde(rename = "itemId")]
    item_id: &'a str,
    #[serde(rename = "pricePlan")]
    price_plan: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreemCheckoutResponse {
    id: String,
    checkout_url: String,
}

/// Creem checkout provider.
pub struct CreemCheckoutAdapter {
    config: CreemConfig,
    http_client: reqwest::Client,
}

impl CreemCheckoutAdapter {
    pub fn new(config: CreemConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn body(request: &CheckoutRequest) -> CreateCheckoutBody<'_> {
        CreateCheckoutBody {
            product_id: &request.product_ref,
            success_url: &request.success_url,
            customer: request
                .customer_email
                .as_deref()
                .map(|email| CustomerBody { email }),
            metadata: MetadataBody {
                user_id: request.user_id.as_str(),
                item_id: request.item_id.as_str(),
                price_plan: request.price_plan.as_str(),
            },
        }
    }
}

#[async_trait]
impl CheckoutProvider for CreemCheckoutAdapter {
    fn kind(&self) -> PaymentProviderKind {
        PaymentProviderKind::Creem
    }

    async fn create_checkout(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let url = format!("{}/v1/checkouts", self.config.api_base_url);

        let response = self
            .http_client
            .post(&url)
            .header("x-api-key", self.config.api_key.expose_secret())
            .json(&Self::body(&request))
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %error_text, "Creem checkout failed");
            return Err(PaymentError::new(
                PaymentErrorCode::from_status(status.as_u16()),
                format!("Creem API error ({}): {}", status.as_u16(), error_text),
            )
            .with_provider_code(status.as_u16().to_string()));
        }

        let checkout: CreemCheckoutResponse = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Creem response: {}", e))
        })?;

        tracing::info!(
            checkout_id = %checkout.id,
            item_id = %request.item_id,
            plan = %request.price_plan,
            "Creem checkout created"
        );

        Ok(CheckoutSession {
            id: checkout.id,
            url: checkout.checkout_url,
        })
    }
}
