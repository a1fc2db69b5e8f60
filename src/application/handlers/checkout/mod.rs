//! Checkout handlers.
//!
//! - CreateCheckout: Creem first, Stripe as fallback
//! - CreateCreemCheckout: Creem only, caller supplies the product

mod create_checkout;
mod create_creem_checkout;
mod pricing;

pub use create_checkout::{
    creem_success_url, stripe_success_url, CreateCheckoutCommand, CreateCheckoutHandler,
    CreateCheckoutResult,
};
pub use create_creem_checkout::{
    CreateCreemCheckoutCommand, CreateCreemCheckoutHandler, CreateCreemCheckoutResult,
};
pub use pricing::CheckoutPricing;
