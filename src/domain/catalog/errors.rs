//! Errors raised by item and newsletter operations.

use thiserror::Error;

use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Content store failure; detail is logged.
    #[error("Content store error: {0}")]
    Storage(String),

    #[error("Checkout failed: {0}")]
    Checkout(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NewsletterError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Audience or store failure; detail is logged.
    #[error("Newsletter provider error: {0}")]
    Upstream(String),
}
