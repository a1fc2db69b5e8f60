//! SubscribeHandler - newsletter sign-up.
//!
//! Contacts live in the hosted audience when one is configured, otherwise in
//! the content store as subscriber documents.

use std::sync::Arc;

use crate::application::emails;
use crate::domain::catalog::{NewSubscriber, NewsletterError};
use crate::domain::foundation::{validate_email, Timestamp};
use crate::ports::{EmailSender, NewsletterAudience, SubscriberRepository};

pub const SUBSCRIBED: &str = "Thanks for subscribing!";
pub const RESUBSCRIBED: &str = "Welcome back! You have been resubscribed.";
pub const ALREADY_SUBSCRIBED: &str = "You are already subscribed!";

#[derive(Debug, Clone, Default)]
pub struct SubscribeCommand {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Subscribed,
    Resubscribed,
    AlreadySubscribed,
}

impl SubscribeOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            SubscribeOutcome::Subscribed => SUBSCRIBED,
            SubscribeOutcome::Resubscribed => RESUBSCRIBED,
            SubscribeOutcome::AlreadySubscribed => ALREADY_SUBSCRIBED,
        }
    }
}

pub struct SubscribeHandler {
    audience: Option<Arc<dyn NewsletterAudience>>,
    subscribers: Arc<dyn SubscriberRepository>,
    mailer: Option<Arc<dyn EmailSender>>,
    app_url: String,
}

impl SubscribeHandler {
    pub fn new(
        audience: Option<Arc<dyn NewsletterAudience>>,
        subscribers: Arc<dyn SubscriberRepository>,
        mailer: Option<Arc<dyn EmailSender>>,
        app_url: impl Into<String>,
    ) -> Self {
        Self {
            audience,
            subscribers,
            mailer,
            app_url: app_url.into(),
        }
    }

    pub async fn handle(&self, cmd: SubscribeCommand) -> Result<SubscribeOutcome, NewsletterError> {
        let email = validate_email("email", cmd.email.as_deref().unwrap_or_default())?;

        let outcome = match &self.audience {
            Some(audience) => self.via_audience(audience.as_ref(), &email).await?,
            None => self.via_store(&email).await?,
        };

        match outcome {
            SubscribeOutcome::AlreadySubscribed => {}
            SubscribeOutcome::Subscribed => self.welcome(&email, false).await,
            SubscribeOutcome::Resubscribed => self.welcome(&email, true).await,
        }
        tracing::info!(outcome = outcome.message(), "Newsletter subscription handled");
        Ok(outcome)
    }

    async fn via_audience(
        &self,
        audience: &dyn NewsletterAudience,
        email: &str,
    ) -> Result<SubscribeOutcome, NewsletterError> {
        let contact = audience.find_contact(email).await.map_err(upstream)?;
        match contact {
            Some(contact) if !contact.unsubscribed => Ok(SubscribeOutcome::AlreadySubscribed),
            Some(contact) => {
                audience
                    .set_unsubscribed(&contact.id, false)
                    .await
                    .map_err(upstream)?;
                Ok(SubscribeOutcome::Resubscribed)
            }
            None => {
                audience.create_contact(email).await.map_err(upstream)?;
                Ok(SubscribeOutcome::Subscribed)
            }
        }
    }

    async fn via_store(&self, email: &str) -> Result<SubscribeOutcome, NewsletterError> {
        let existing = self.subscribers.find_by_email(email).await.map_err(upstream)?;
        match existing {
            Some(subscriber) if subscriber.is_active() => Ok(SubscribeOutcome::AlreadySubscribed),
            Some(subscriber) => {
                self.subscribers
                    .reactivate(&subscriber.id)
                    .await
                    .map_err(upstream)?;
                Ok(SubscribeOutcome::Resubscribed)
            }
            None => {
                self.subscribers
                    .create(NewSubscriber {
                        email: email.to_string(),
                        source: "website".to_string(),
                        subscribed_at: Timestamp::now(),
                    })
                    .await
                    .map_err(upstream)?;
                Ok(SubscribeOutcome::Subscribed)
            }
        }
    }

    async fn welcome(&self, email: &str, resubscribed: bool) {
        let Some(mailer) = &self.mailer else {
            tracing::warn!("No email sender configured; skipping welcome email");
            return;
        };
        let message = emails::newsletter_welcome(&self.app_url, email, resubscribed);
        if let Err(e) = mailer.send(message).await {
            tracing::error!(error = %e, "Failed to send newsletter welcome email");
        }
    }
}

pub(super) fn upstream(e: impl std::fmt::Display) -> NewsletterError {
    tracing::error!(error = %e, "Newsletter upstream call failed");
    NewsletterError::Upstream(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::email::{MockAudience, MockEmailSender};
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::catalog::{Subscriber, SubscriberStatus};
    use crate::ports::{EmailError, StoreError};

    fn command(email: &str) -> SubscribeCommand {
        SubscribeCommand {
            email: Some(email.to_string()),
        }
    }

    fn audience_handler(
        audience: Arc<MockAudience>,
        mailer: Arc<MockEmailSender>,
    ) -> SubscribeHandler {
        SubscribeHandler::new(
            Some(audience),
            Arc::new(InMemoryStore::new()),
            Some(mailer),
            "https://dir.example",
        )
    }

    #[tokio::test]
    async fn new_audience_contact_is_welcomed() {
        let audience = Arc::new(MockAudience::new());
        let mailer = Arc::new(MockEmailSender::new());
        let handler = audience_handler(audience.clone(), mailer.clone());

        let outcome = handler.handle(command("ada@example.com")).await.unwrap();

        assert_eq!(outcome, SubscribeOutcome::Subscribed);
        assert_eq!(outcome.message(), "Thanks for subscribing!");
        assert_eq!(audience.contacts().len(), 1);
        assert_eq!(mailer.sent()[0].subject, "Welcome to our newsletter!");
    }

    #[tokio::test]
    async fn active_contact_is_already_subscribed() {
        let audience = Arc::new(MockAudience::new().with_contact("Ada@Example.com", false));
        let mailer = Arc::new(MockEmailSender::new());
        let handler = audience_handler(audience, mailer.clone());

        let outcome = handler.handle(command("ada@example.com")).await.unwrap();

        assert_eq!(outcome, SubscribeOutcome::AlreadySubscribed);
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn unsubscribed_contact_is_resubscribed() {
        let audience = Arc::new(MockAudience::new().with_contact("ada@example.com", true));
        let mailer = Arc::new(MockEmailSender::new());
        let handler = audience_handler(audience.clone(), mailer.clone());

        let outcome = handler.handle(command("ada@example.com")).await.unwrap();

        assert_eq!(outcome, SubscribeOutcome::Resubscribed);
        assert!(!audience.contacts()[0].unsubscribed);
        assert_eq!(mailer.sent()[0].subject, "Welcome back to our newsletter!");
    }

    #[tokio::test]
    async fn store_mode_creates_and_reactivates() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_subscriber(Subscriber {
            id: "subscriber.old".to_string(),
            email: "old@example.com".to_string(),
            status: SubscriberStatus::Unsubscribed,
        });
        let handler = SubscribeHandler::new(None, store.clone(), None, "https://dir.example");

        assert_eq!(
            handler.handle(command("new@example.com")).await.unwrap(),
            SubscribeOutcome::Subscribed
        );
        assert_eq!(
            handler.handle(command("old@example.com")).await.unwrap(),
            SubscribeOutcome::Resubscribed
        );
        assert_eq!(
            handler.handle(command("new@example.com")).await.unwrap(),
            SubscribeOutcome::AlreadySubscribed
        );
        assert!(store.subscribers().iter().all(|s| s.is_active()));
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let handler =
            SubscribeHandler::new(None, Arc::new(InMemoryStore::new()), None, "https://dir.example");
        let result = handler.handle(command("not-an-email")).await;
        assert!(matches!(result, Err(NewsletterError::Validation(_))));
        let result = handler.handle(SubscribeCommand::default()).await;
        assert!(matches!(result, Err(NewsletterError::Validation(_))));
    }

    #[tokio::test]
    async fn welcome_failure_still_subscribes() {
        let audience = Arc::new(MockAudience::new());
        let mailer = Arc::new(MockEmailSender::failing(EmailError::Request("down".to_string())));
        let handler = audience_handler(audience, mailer);
        assert_eq!(
            handler.handle(command("ada@example.com")).await.unwrap(),
            SubscribeOutcome::Subscribed
        );
    }

    #[tokio::test]
    async fn upstream_failures_surface() {
        let audience = Arc::new(
            MockAudience::new().with_error(EmailError::Rejected {
                status: 500,
                message: "boom".to_string(),
            }),
        );
        let handler = audience_handler(audience, Arc::new(MockEmailSender::new()));
        assert!(matches!(
            handler.handle(command("ada@example.com")).await,
            Err(NewsletterError::Upstream(_))
        ));

        let store = Arc::new(InMemoryStore::new());
        store.fail_next(StoreError::Request("down".to_string()));
        let handler = SubscribeHandler::new(None, store, None, "https://dir.example");
        assert!(matches!(
            handler.handle(command("ada@example.com")).await,
            Err(NewsletterError::Upstream(_))
        ));
    }
}
