//! Stripe checkout adapter.
//!
//! Implements the `CheckoutProvider` port for Stripe Checkout Sessions.
//! Secrets are handled via `secrecy::SecretString`.

mod mock_checkout_provider;
mod stripe_adapter;

pub use mock_checkout_provider::MockCheckoutProvider;
pub use stripe_adapter::{StripeCheckoutAdapter, StripeConfig};
