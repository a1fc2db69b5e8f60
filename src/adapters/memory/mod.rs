//! In-memory adapters for tests and local development.

mod in_memory_store;

pub use in_memory_store::{InMemoryStore, ItemRecord};
