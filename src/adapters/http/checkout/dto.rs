//! Request and response bodies for checkout endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::checkout::{CreateCheckoutResult, CreateCreemCheckoutResult};
use crate::domain::payment::PaymentProviderKind;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub item_id: Option<String>,
    pub price_plan: Option<String>,
    pub provider: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub checkout_url: String,
    pub provider: PaymentProviderKind,
}

impl From<CreateCheckoutResult> for CheckoutResponse {
    fn from(result: CreateCheckoutResult) -> Self {
        Self {
            checkout_url: result.checkout_url,
            provider: result.provider,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreemCheckoutRequest {
    pub product_id: Option<String>,
    pub user_id: Option<String>,
    pub item_id: Option<String>,
    pub price_plan: Option<String>,
    pub customer_email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreemCheckoutResponse {
    pub checkout_id: String,
    pub url: String,
}

impl From<CreateCreemCheckoutResult> for CreemCheckoutResponse {
    fn from(result: CreateCreemCheckoutResult) -> Self {
        Self {
            checkout_id: result.checkout_id,
            url: result.url,
        }
    }
}
