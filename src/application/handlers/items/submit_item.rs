//! SubmitItemHandler - stores a new listing and starts payment for paid plans.

use std::sync::Arc;

use reqwest::Url;

use crate::application::handlers::checkout::{stripe_success_url, CheckoutPricing};
use crate::domain::catalog::{slugify, CatalogError, NewItem, PricePlan, SubmittedItem};
use crate::domain::foundation::{require_text, UserId, ValidationError};
use crate::ports::{CheckoutProvider, CheckoutRequest, ItemRepository};

pub const SUBMISSION_RECEIVED: &str = "Submission received! We will review it shortly.";

/// Submission form as sent by the client.
#[derive(Debug, Clone)]
pub struct SubmitItemCommand {
    pub submitter: UserId,
    pub link: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub introduction: Option<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub price_plan: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitItemResult {
    pub item: SubmittedItem,
    /// Present when a paid plan was chosen and checkout could be created.
    pub checkout_url: Option<String>,
}

pub struct SubmitItemHandler {
    items: Arc<dyn ItemRepository>,
    stripe: Option<Arc<dyn CheckoutProvider>>,
    pricing: CheckoutPricing,
    app_url: String,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validates the form in field order, reporting the first failure.
fn validate(cmd: SubmitItemCommand) -> Result<NewItem, ValidationError> {
    let link = require_text("link", cmd.link.as_deref())?;
    match Url::parse(&link) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => return Err(ValidationError::invalid_format("link", "Please enter a valid URL")),
    }
    let name = require_text("name", cmd.name.as_deref())?;
    let description = require_text("description", cmd.description.as_deref())?;

    let categories: Vec<String> = cmd
        .categories
        .into_iter()
        .filter_map(|c| non_blank(Some(c)))
        .collect();
    if categories.is_empty() {
        return Err(ValidationError::too_few("categories", 1));
    }

    let price_plan = match non_blank(cmd.price_plan) {
        Some(plan) => plan.parse::<PricePlan>()?,
        None => PricePlan::Free,
    };

    Ok(NewItem {
        slug: slugify(&name),
        name,
        link,
        description,
        introduction: non_blank(cmd.introduction),
        price_plan,
        categories,
        tags: cmd.tags.into_iter().filter_map(|t| non_blank(Some(t))).collect(),
        icon_asset: non_blank(cmd.icon),
        image_asset: non_blank(cmd.image),
        submitter: cmd.submitter,
    })
}

impl SubmitItemHandler {
    pub fn new(
        items: Arc<dyn ItemRepository>,
        stripe: Option<Arc<dyn CheckoutProvider>>,
        pricing: CheckoutPricing,
        app_url: impl Into<String>,
    ) -> Self {
        Self {
            items,
            stripe,
            pricing,
            app_url: app_url.into(),
        }
    }

    pub async fn handle(&self, cmd: SubmitItemCommand) -> Result<SubmitItemResult, CatalogError> {
        let new_item = validate(cmd)?;
        let submitter = new_item.submitter.clone();

        let item = self.items.create(new_item).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to store submitted item");
            CatalogError::Storage(e.to_string())
        })?;
        tracing::info!(item_id = %item.id, plan = %item.price_plan, "Item submitted");

        let checkout_url = self.checkout(&item, submitter).await?;
        Ok(SubmitItemResult { item, checkout_url })
    }

    async fn checkout(
        &self,
        item: &SubmittedItem,
        submitter: UserId,
    ) -> Result<Option<String>, CatalogError> {
        if !item.price_plan.is_paid() {
            return Ok(None);
        }
        let (Some(stripe), Some(price)) = (&self.stripe, self.pricing.stripe_price(item.price_plan))
        else {
            tracing::warn!(item_id = %item.id, "Paid plan chosen but Stripe is not configured");
            return Ok(None);
        };

        let request = CheckoutRequest {
            product_ref: price.to_string(),
            user_id: submitter,
            item_id: item.id.clone(),
            price_plan: item.price_plan,
            success_url: stripe_success_url(&self.app_url),
            cancel_url: Some(format!("{}/payment/cancel", self.app_url)),
            customer_email: None,
        };
        let session = stripe.create_checkout(request).await.map_err(|e| {
            tracing::error!(item_id = %item.id, error = %e, "Checkout for submission failed");
            CatalogError::Checkout(e.message)
        })?;
        Ok(Some(session.url))
    }
}
