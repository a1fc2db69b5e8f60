//! HTTP adapter for OAuth sign-in.
//!
//! - `GET /api/auth/signin/{provider}` - redirect to the provider
//! - `GET /api/auth/callback/{provider}` - finish sign-in, set the session cookie

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::auth_routes;
