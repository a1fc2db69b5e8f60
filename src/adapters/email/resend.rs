//! Resend adapters: transactional email and the newsletter audience.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::ports::{AudienceContact, EmailError, EmailMessage, EmailSender, NewsletterAudience};

const RESEND_API: &str = "https://api.resend.com";

/// Shared HTTP plumbing for the Resend API.
#[derive(Clone)]
struct ResendApi {
    http: Client,
    api_key: SecretString,
    base_url: String,
}

impl ResendApi {
    fn new(api_key: &str) -> Self {
        Self {
            http: Client::new(),
            api_key: SecretString::new(api_key.to_string()),
            base_url: RESEND_API.to_string(),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(self.api_key.expose_secret())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, EmailError> {
        let response = request
            .send()
            .await
            .map_err(|e| EmailError::Request(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ResendErrorBody>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        Err(EmailError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ResendErrorBody {
    message: String,
}

#[derive(Debug, Serialize)]
struct SendEmailBody<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

/// Sends transactional email through Resend.
#[derive(Clone)]
pub struct ResendEmailSender {
    api: ResendApi,
    from: String,
}

impl ResendEmailSender {
    /// `from` is a full header value, e.g. `Directory <hello@dir.example>`.
    pub fn new(api_key: &str, from: impl Into<String>) -> Self {
        Self {
            api: ResendApi::new(api_key),
            from: from.into(),
        }
    }
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        let body = SendEmailBody {
            from: &self.from,
            to: [message.to.as_str()],
            subject: &message.subject,
            html: &message.html,
        };
        self.api
            .send(self.api.request(reqwest::Method::POST, "/emails").json(&body))
            .await?;
        tracing::debug!(subject = %message.subject, "Email sent");
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ContactList {
    #[serde(default)]
    data: Vec<ContactRecord>,
}

#[derive(Debug, Deserialize)]
struct ContactRecord {
    id: String,
    email: String,
    #[serde(default)]
    unsubscribed: bool,
}

impl From<ContactRecord> for AudienceContact {
    fn from(record: ContactRecord) -> Self {
        AudienceContact {
            id: record.id,
            email: record.email,
            unsubscribed: record.unsubscribed,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreatedContact {
    id: String,
}

/// Newsletter contacts kept in a Resend audience.
#[derive(Clone)]
pub struct ResendAudience {
    api: ResendApi,
    audience_id: String,
}

impl ResendAudience {
    pub fn new(api_key: &str, audience_id: impl Into<String>) -> Self {
        Self {
            api: ResendApi::new(api_key),
            audience_id: audience_id.into(),
        }
    }

    fn contacts_path(&self) -> String {
        format!("/audiences/{}/contacts", self.audience_id)
    }
}

fn find_in(list: ContactList, email: &str) -> Option<AudienceContact> {
    list.data
        .into_iter()
        .find(|c| c.email.eq_ignore_ascii_case(email))
        .map(AudienceContact::from)
}

#[async_trait]
impl NewsletterAudience for ResendAudience {
    async fn find_contact(&self, email: &str) -> Result<Option<AudienceContact>, EmailError> {
        let response = self
            .api
            .send(self.api.request(reqwest::Method::GET, &self.contacts_path()))
            .await?;
        let list: ContactList = response
            .json()
            .await
            .map_err(|e| EmailError::Request(e.to_string()))?;
        Ok(find_in(list, email))
    }

    async fn create_contact(&self, email: &str) -> Result<AudienceContact, EmailError> {
        let response = self
            .api
            .send(
                self.api
                    .request(reqwest::Method::POST, &self.contacts_path())
                    .json(&serde_json::json!({ "email": email, "unsubscribed": false })),
            )
            .await?;
        let created: CreatedContact = response
            .json()
            .await
            .map_err(|e| EmailError::Request(e.to_string()))?;
        Ok(AudienceContact {
            id: created.id,
            email: email.to_string(),
            unsubscribed: false,
        })
    }

    async fn set_unsubscribed(
        &self,
        contact_id: &str,
        unsubscribed: bool,
    ) -> Result<(), EmailError> {
        let path = format!("{}/{}", self.contacts_path(), contact_id);
        self.api
            .send(
                self.api
                    .request(reqwest::Method::PATCH, &path)
                    .json(&serde_json::json!({ "unsubscribed": unsubscribed })),
            )
            .await?;
        Ok(())
    }
}
