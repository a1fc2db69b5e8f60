//! Payment webhook handlers.

mod handle_creem_webhook;

pub use handle_creem_webhook::{
    HandleCreemWebhookCommand, HandleCreemWebhookHandler, WebhookOutcome,
};
