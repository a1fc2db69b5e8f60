//! Provider product references per paid plan.

use crate::config::PaymentConfig;
use crate::domain::catalog::PricePlan;

/// Creem product ids and Stripe price ids for the paid plans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutPricing {
    pub creem_pro_product: Option<String>,
    pub creem_sponsor_product: Option<String>,
    pub stripe_pro_price: Option<String>,
    pub stripe_sponsor_price: Option<String>,
}

fn configured(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(String::from)
}

impl CheckoutPricing {
    pub fn from_config(config: &PaymentConfig) -> Self {
        Self {
            creem_pro_product: configured(&config.creem_pro_product_id),
            creem_sponsor_product: configured(&config.creem_sponsor_product_id),
            stripe_pro_price: configured(&config.stripe_pro_price_id),
            stripe_sponsor_price: configured(&config.stripe_sponsor_price_id),
        }
    }

    pub fn creem_product(&self, plan: PricePlan) -> Option<&str> {
        match plan {
            PricePlan::Pro => self.creem_pro_product.as_deref(),
            PricePlan::Sponsor => self.creem_sponsor_product.as_deref(),
            PricePlan::Free => None,
        }
    }

    pub fn stripe_price(&self, plan: PricePlan) -> Option<&str> {
        match plan {
            PricePlan::Pro => self.stripe_pro_price.as_deref(),
            PricePlan::Sponsor => self.stripe_sponsor_price.as_deref(),
            PricePlan::Free => None,
        }
    }
}
