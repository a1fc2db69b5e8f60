//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, validation)
//! - `session` - Signed-in user and the session cookie codec
//! - `auth` - OAuth providers, profiles and callback checks
//! - `catalog` - Users, items, orders and subscribers
//! - `payment` - Payment providers and Creem webhook events

pub mod auth;
pub mod catalog;
pub mod foundation;
pub mod payment;
pub mod session;
