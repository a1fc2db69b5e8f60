//! HTTP adapter for checkout endpoints.
//!
//! - `POST /api/checkout` - checkout for the signed-in user (Creem, else Stripe)
//! - `POST /api/checkout/creem` - Creem checkout for an explicit product

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::checkout_routes;
