//! HTTP adapter for the newsletter.
//!
//! - `POST /api/newsletter/subscribe`
//! - `POST /api/newsletter/unsubscribe`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::newsletter_routes;
