//! CreateCheckoutHandler - hosted checkout for a listing upgrade.
//!
//! Creem is used when requested and configured for the plan; otherwise the
//! request falls through to Stripe.

use std::sync::Arc;

use super::pricing::CheckoutPricing;
use crate::domain::catalog::PricePlan;
use crate::domain::foundation::{ItemId, UserId};
use crate::domain::payment::{CheckoutError, PaymentProviderKind};
use crate::ports::{CheckoutProvider, CheckoutRequest};

/// Checkout request from a signed-in user.
#[derive(Debug, Clone)]
pub struct CreateCheckoutCommand {
    pub user_id: UserId,
    pub customer_email: Option<String>,
    pub item_id: Option<String>,
    pub price_plan: Option<String>,
    /// `creem` (default) or anything else for Stripe.
    pub provider: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCheckoutResult {
    pub checkout_url: String,
    pub provider: PaymentProviderKind,
}

/// Success page for a Creem checkout.
pub fn creem_success_url(app_url: &str, item_id: &ItemId) -> String {
    format!("{}/publish/{}?pay=success&provider=creem", app_url, item_id)
}

/// Success page for a Stripe checkout; Stripe fills in the session id.
pub fn stripe_success_url(app_url: &str) -> String {
    format!("{}/payment/success?session_id={{CHECKOUT_SESSION_ID}}", app_url)
}

/// Parses a required paid plan.
pub(super) fn paid_plan(value: Option<&str>) -> Result<PricePlan, CheckoutError> {
    let value = value
        .filter(|v| !v.is_empty())
        .ok_or(CheckoutError::MissingField("pricePlan"))?;
    PricePlan::parse_paid(value).ok_or_else(|| CheckoutError::UnknownPricePlan(value.to_string()))
}

pub struct CreateCheckoutHandler {
    creem: Option<Arc<dyn CheckoutProvider>>,
    stripe: Option<Arc<dyn CheckoutProvider>>,
    pricing: CheckoutPricing,
    app_url: String,
}

impl CreateCheckoutHandler {
    pub fn new(
        creem: Option<Arc<dyn CheckoutProvider>>,
        stripe: Option<Arc<dyn CheckoutProvider>>,
        pricing: CheckoutPricing,
        app_url: impl Into<String>,
    ) -> Self {
        Self {
            creem,
            stripe,
            pricing,
            app_url: app_url.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutCommand,
    ) -> Result<CreateCheckoutResult, CheckoutError> {
        let item_id = cmd
            .item_id
            .as_deref()
            .and_then(|id| ItemId::new(id).ok())
            .ok_or(CheckoutError::MissingField("itemId"))?;
        let plan = paid_plan(cmd.price_plan.as_deref())?;
        let requested = PaymentProviderKind::from_hint(cmd.provider.as_deref());

        if requested == PaymentProviderKind::Creem {
            if let (Some(creem), Some(product)) = (&self.creem, self.pricing.creem_product(plan)) {
                let request = CheckoutRequest {
                    product_ref: product.to_string(),
                    user_id: cmd.user_id,
                    item_id: item_id.clone(),
                    price_plan: plan,
                    success_url: creem_success_url(&self.app_url, &item_id),
                    cancel_url: None,
                    customer_email: cmd.customer_email,
                };
                return self.create(creem.as_ref(), request).await;
            }
            tracing::debug!(plan = %plan, "Creem not configured for plan; falling back to Stripe");
        }

        let (stripe, price) = match (&self.stripe, self.pricing.stripe_price(plan)) {
            (Some(stripe), Some(price)) => (stripe, price),
            _ => {
                return Err(CheckoutError::ProviderNotConfigured(
                    PaymentProviderKind::Stripe,
                ))
            }
        };

        let request = CheckoutRequest {
            product_ref: price.to_string(),
            user_id: cmd.user_id,
            item_id: item_id.clone(),
            price_plan: plan,
            success_url: stripe_success_url(&self.app_url),
            cancel_url: Some(format!("{}/payment/{}", self.app_url, item_id)),
            customer_email: None,
        };
        self.create(stripe.as_ref(), request).await
    }

    async fn create(
        &self,
        provider: &dyn CheckoutProvider,
        request: CheckoutRequest,
    ) -> Result<CreateCheckoutResult, CheckoutError> {
        let kind = provider.kind();
        let item_id = request.item_id.clone();
        let session = provider.create_checkout(request).await.map_err(|e| {
            tracing::error!(provider = %kind, item_id = %item_id, error = %e, "Checkout creation failed");
            CheckoutError::CreationFailed(e.message)
        })?;
        Ok(CreateCheckoutResult {
            checkout_url: session.url,
            provider: kind,
        })
    }
}
