//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and validation errors
//! that form the vocabulary of the directory domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{require_text, validate_email, ValidationError};
pub use ids::{prefixed_document_id, ItemId, OrderId, UserId};
pub use timestamp::Timestamp;
