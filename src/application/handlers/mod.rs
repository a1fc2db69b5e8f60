//! Application handlers, grouped by feature.

pub mod auth;
pub mod checkout;
pub mod items;
pub mod newsletter;
pub mod payment;
