//! UnsubscribeHandler - opts a contact out of the hosted audience.

use std::sync::Arc;

use super::subscribe::upstream;
use crate::domain::catalog::NewsletterError;
use crate::domain::foundation::validate_email;
use crate::ports::NewsletterAudience;

pub const UNSUBSCRIBED: &str = "You have been unsubscribed.";

#[derive(Debug, Clone, Default)]
pub struct UnsubscribeCommand {
    pub email: Option<String>,
}

pub struct UnsubscribeHandler {
    audience: Option<Arc<dyn NewsletterAudience>>,
}

impl UnsubscribeHandler {
    pub fn new(audience: Option<Arc<dyn NewsletterAudience>>) -> Self {
        Self { audience }
    }

    /// Succeeds when there is nothing to unsubscribe.
    pub async fn handle(&self, cmd: UnsubscribeCommand) -> Result<(), NewsletterError> {
        let email = validate_email("email", cmd.email.as_deref().unwrap_or_default())?;

        let Some(audience) = &self.audience else {
            tracing::warn!("Newsletter audience not configured; nothing to unsubscribe");
            return Ok(());
        };

        match audience.find_contact(&email).await.map_err(upstream)? {
            Some(contact) => {
                audience
                    .set_unsubscribed(&contact.id, true)
                    .await
                    .map_err(upstream)?;
                tracing::info!(contact_id = %contact.id, "Newsletter contact unsubscribed");
            }
            None => tracing::debug!("Unsubscribe for unknown contact"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::email::MockAudience;
    use crate::ports::EmailError;

    fn command(email: &str) -> UnsubscribeCommand {
        UnsubscribeCommand {
            email: Some(email.to_string()),
        }
    }

    #[tokio::test]
    async fn marks_contact_unsubscribed() {
        let audience = Arc::new(MockAudience::new().with_contact("ada@example.com", false));
        let handler = UnsubscribeHandler::new(Some(audience.clone()));

        handler.handle(command("ADA@example.com")).await.unwrap();

        assert!(audience.contacts()[0].unsubscribed);
    }

    #[tokio::test]
    async fn unknown_contact_and_missing_audience_succeed() {
        let handler = UnsubscribeHandler::new(Some(Arc::new(MockAudience::new())));
        assert!(handler.handle(command("ghost@example.com")).await.is_ok());
        assert!(UnsubscribeHandler::new(None)
            .handle(command("ghost@example.com"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn invalid_email_and_upstream_failure() {
        let handler = UnsubscribeHandler::new(Some(Arc::new(
            MockAudience::new().with_error(EmailError::Request("down".to_string())),
        )));
        assert!(matches!(
            handler.handle(command("nope")).await,
            Err(NewsletterError::Validation(_))
        ));
        assert!(matches!(
            handler.handle(command("ada@example.com")).await,
            Err(NewsletterError::Upstream(_))
        ));
    }
}
