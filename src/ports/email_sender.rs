//! Transactional email port.

use async_trait::async_trait;
use thiserror::Error;

/// A rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Email request failed: {0}")]
    Request(String),

    #[error("Email provider rejected the message ({status}): {message}")]
    Rejected { status: u16, message: String },
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError>;
}
