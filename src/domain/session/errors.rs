//! Session errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Token missing, malformed, expired or not signed by us.
    #[error("Invalid session")]
    InvalidSession,

    #[error("Failed to encode session: {0}")]
    Encoding(String),
}
