//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `sanity` - content store (users, items, orders, subscribers)
//! - `creem`, `stripe` - hosted checkout
//! - `oauth` - Google and GitHub sign-in
//! - `email` - Resend transactional email and newsletter audience
//! - `memory` - in-memory store for tests and local runs
//! - `http` - axum JSON API

pub mod creem;
pub mod email;
pub mod http;
pub mod memory;
pub mod oauth;
pub mod sanity;
pub mod stripe;
