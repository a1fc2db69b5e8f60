//! Newsletter handlers.

mod subscribe;
mod unsubscribe;

pub use subscribe::{SubscribeCommand, SubscribeHandler, SubscribeOutcome};
pub use unsubscribe::{UnsubscribeCommand, UnsubscribeHandler, UNSUBSCRIBED};
