//! Sanity content store adapter.
//!
//! `SanityStore` implements the user, item, order and subscriber repository
//! ports over the Sanity HTTP API. Query text is built in [`groq`] and
//! written documents in `documents`.

mod client;
mod documents;
pub mod groq;
mod store;

pub use client::{QueryParams, SanityClient};
pub use store::SanityStore;
