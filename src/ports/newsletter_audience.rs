//! Newsletter audience port (hosted contact list).

use async_trait::async_trait;

use super::email_sender::EmailError;

/// A contact in the hosted audience.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudienceContact {
    pub id: String,
    pub email: String,
    pub unsubscribed: bool,
}

#[async_trait]
pub trait NewsletterAudience: Send + Sync {
    /// Looks a contact up by email, case-insensitively.
    async fn find_contact(&self, email: &str) -> Result<Option<AudienceContact>, EmailError>;

    async fn create_contact(&self, email: &str) -> Result<AudienceContact, EmailError>;

    async fn set_unsubscribed(&self, contact_id: &str, unsubscribed: bool)
        -> Result<(), EmailError>;
}
