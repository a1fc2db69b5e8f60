//! HTTP adapter - the JSON API and OAuth redirects served by axum.
//!
//! Handlers translate requests into application commands and map domain
//! errors onto [`ErrorResponse`] bodies through [`ApiError`].

pub mod auth;
pub mod body;
pub mod checkout;
pub mod error;
pub mod items;
pub mod newsletter;
pub mod router;
pub mod session;
pub mod state;
pub mod webhooks;

pub use error::{ApiError, ErrorResponse};
pub use router::app_router;
pub use state::AppState;
