//! HTTP adapter for payment webhooks.
//!
//! - `POST /api/webhooks/creem` - signed Creem event deliveries

pub mod handlers;
pub mod routes;

pub use routes::webhook_routes;
