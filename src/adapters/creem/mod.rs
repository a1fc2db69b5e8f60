//! Creem checkout adapter.
//!
//! Implements the `CheckoutProvider` port against the Creem REST API.
//! Webhook verification lives in the payment domain.

mod creem_adapter;

pub use creem_adapter::{CreemCheckoutAdapter, CreemConfig};
