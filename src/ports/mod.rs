//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CheckoutProvider` - hosted checkout (Creem, Stripe)
//! - `OAuthProvider` - Google / GitHub sign-in
//! - `UserRepository`, `ItemRepository`, `OrderRepository`,
//!   `SubscriberRepository` - content store documents
//! - `EmailSender`, `NewsletterAudience` - transactional email and contacts

mod checkout_provider;
mod content_store;
mod email_sender;
mod newsletter_audience;
mod oauth_provider;

pub use checkout_provider::{
    CheckoutProvider, CheckoutRequest, CheckoutSession, PaymentError, PaymentErrorCode,
};
pub use content_store::{
    ItemRepository, OrderRepository, StoreError, SubscriberRepository, UserRepository,
};
pub use email_sender::{EmailError, EmailMessage, EmailSender};
pub use newsletter_audience::{AudienceContact, NewsletterAudience};
pub use oauth_provider::OAuthProvider;
