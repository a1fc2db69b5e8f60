//! Payment domain - provider identity and Creem webhook events.

mod checkout_errors;
mod creem_event;
mod provider;
mod webhook_errors;
mod webhook_verifier;

pub use checkout_errors::CheckoutError;
pub use creem_event::{
    AccessChange, CheckoutCompleted, CheckoutMetadata, CreemCustomer, CreemEvent, CreemOrder,
    CreemProduct, CreemWebhookEvent, Expandable, ResourceRef, SubscriptionEventKind,
    SubscriptionObject,
};
pub use provider::PaymentProviderKind;
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{sign_payload, CreemWebhookVerifier};
