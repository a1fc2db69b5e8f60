//! Strongly-typed identifier value objects.
//!
//! Content store documents are keyed by opaque strings (`_id`), so every
//! identifier here wraps a non-empty `String`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

macro_rules! document_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning error if empty.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Ok(Self(id))
            }

            /// Returns the inner string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

document_id!(
    /// Identifier of a `user` document.
    UserId,
    "userId"
);

document_id!(
    /// Identifier of an `item` (directory listing) document.
    ItemId,
    "itemId"
);

document_id!(
    /// Identifier of an `order` document.
    OrderId,
    "orderId"
);

/// Generates a content store document id with a type prefix, e.g. `item.<uuid>`.
pub fn prefixed_document_id(prefix: &str) -> String {
    format!("{}.{}", prefix, uuid::Uuid::new_v4())
}
