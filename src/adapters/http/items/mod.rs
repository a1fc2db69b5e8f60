//! HTTP adapter for directory items.
//!
//! - `GET /api/items` - paginated listing
//! - `GET /api/items/{slug}` - one item with related items
//! - `POST /api/submit` - submit a new item (signed in)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{item_routes, submit_routes};
