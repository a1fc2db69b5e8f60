//! CreateCreemCheckoutHandler - direct Creem checkout for a known product.

use std::sync::Arc;

use super::create_checkout::{creem_success_url, paid_plan};
use crate::domain::foundation::{ItemId, UserId};
use crate::domain::payment::{CheckoutError, PaymentProviderKind};
use crate::ports::{CheckoutProvider, CheckoutRequest};

#[derive(Debug, Clone, Default)]
pub struct CreateCreemCheckoutCommand {
    pub product_id: Option<String>,
    pub user_id: Option<String>,
    pub item_id: Option<String>,
    pub price_plan: Option<String>,
    pub customer_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCreemCheckoutResult {
    pub checkout_id: String,
    pub url: String,
}

pub struct CreateCreemCheckoutHandler {
    creem: Option<Arc<dyn CheckoutProvider>>,
    app_url: String,
}

fn required(value: Option<String>, field: &'static str) -> Result<String, CheckoutError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(CheckoutError::MissingField(field))
}

impl CreateCreemCheckoutHandler {
    pub fn new(creem: Option<Arc<dyn CheckoutProvider>>, app_url: impl Into<String>) -> Self {
        Self {
            creem,
            app_url: app_url.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCreemCheckoutCommand,
    ) -> Result<CreateCreemCheckoutResult, CheckoutError> {
        let product_id = required(cmd.product_id, "productId")?;
        let user_id = UserId::new(required(cmd.user_id, "userId")?)
            .map_err(|_| CheckoutError::MissingField("userId"))?;
        let item_id = ItemId::new(required(cmd.item_id, "itemId")?)
            .map_err(|_| CheckoutError::MissingField("itemId"))?;
        let plan = paid_plan(cmd.price_plan.as_deref())?;

        let creem = self
            .creem
            .as_ref()
            .ok_or(CheckoutError::ProviderNotConfigured(PaymentProviderKind::Creem))?;

        let request = CheckoutRequest {
            product_ref: product_id,
            user_id,
            item_id: item_id.clone(),
            price_plan: plan,
            success_url: creem_success_url(&self.app_url, &item_id),
            cancel_url: None,
            customer_email: cmd.customer_email.filter(|e| !e.is_empty()),
        };

        let session = creem.create_checkout(request).await.map_err(|e| {
            tracing::error!(item_id = %item_id, error = %e, "Creem checkout creation failed");
            CheckoutError::CreationFailed(e.message)
        })?;

        tracing::info!(item_id = %item_id, checkout_id = %session.id, "Creem checkout created");
        Ok(CreateCreemCheckoutResult {
            checkout_id: session.id,
            url: session.url,
        })
    }
}
