//! Recording email and audience mocks for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{AudienceContact, EmailError, EmailMessage, EmailSender, NewsletterAudience};

/// Records sent messages; can be told to fail.
#[derive(Debug, Default)]
pub struct MockEmailSender {
    sent: Mutex<Vec<EmailMessage>>,
    fail: Mutex<Option<EmailError>>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send fails with this error.
    pub fn failing(error: EmailError) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: Mutex::new(Some(error)),
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        if let Some(error) = self.fail.lock().unwrap().clone() {
            return Err(error);
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

/// Audience held in memory.
#[derive(Debug, Default)]
pub struct MockAudience {
    contacts: Mutex<Vec<AudienceContact>>,
    fail: Mutex<Option<EmailError>>,
}

impl MockAudience {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contact(self, email: &str, unsubscribed: bool) -> Self {
        {
            let mut contacts = self.contacts.lock().unwrap();
            let id = format!("contact-{}", contacts.len() + 1);
            contacts.push(AudienceContact {
                id,
                email: email.to_string(),
                unsubscribed,
            });
        }
        self
    }

    /// Every call fails with this error.
    pub fn with_error(self, error: EmailError) -> Self {
        *self.fail.lock().unwrap() = Some(error);
        self
    }

    pub fn contacts(&self) -> Vec<AudienceContact> {
        self.contacts.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), EmailError> {
        match self.fail.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl NewsletterAudience for MockAudience {
    async fn find_contact(&self, email: &str) -> Result<Option<AudienceContact>, EmailError> {
        self.check()?;
        Ok(self
            .contacts
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create_contact(&self, email: &str) -> Result<AudienceContact, EmailError> {
        self.check()?;
        let mut contacts = self.contacts.lock().unwrap();
        let contact = AudienceContact {
            id: format!("contact-{}", contacts.len() + 1),
            email: email.to_string(),
            unsubscribed: false,
        };
        contacts.push(contact.clone());
        Ok(contact)
    }

    async fn set_unsubscribed(
        &self,
        contact_id: &str,
        unsubscribed: bool,
    ) -> Result<(), EmailError> {
        self.check()?;
        let mut contacts = self.contacts.lock().unwrap();
        if let Some(contact) = contacts.iter_mut().find(|c| c.id == contact_id) {
            contact.unsubscribed = unsubscribed;
        }
        Ok(())
    }
}
