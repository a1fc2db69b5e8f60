//! Shared application state for the HTTP layer.

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::handlers::auth::{BeginSignInHandler, CompleteSignInHandler};
use crate::application::handlers::checkout::{
    CheckoutPricing, CreateCheckoutHandler, CreateCreemCheckoutHandler,
};
use crate::application::handlers::items::{GetItemHandler, ListItemsHandler, SubmitItemHandler};
use crate::application::handlers::newsletter::{SubscribeHandler, UnsubscribeHandler};
use crate::application::handlers::payment::HandleCreemWebhookHandler;
use crate::domain::auth::{OAuthError, OAuthProviderKind};
use crate::domain::payment::CreemWebhookVerifier;
use crate::domain::session::SessionCodec;
use crate::ports::{
    CheckoutProvider, EmailSender, ItemRepository, NewsletterAudience, OAuthProvider,
    OrderRepository, SubscriberRepository, UserRepository,
};

/// Dependencies shared by every request.
///
/// Cloned per request; everything inside is `Arc`-wrapped. Optional
/// collaborators are `None` when their credentials are not configured.
#[derive(Clone)]
pub struct AppState {
    pub app_url: String,
    /// Mark cookies `Secure` (production).
    pub secure_cookies: bool,
    pub sessions: SessionCodec,
    pub oauth: HashMap<OAuthProviderKind, Arc<dyn OAuthProvider>>,
    pub users: Arc<dyn UserRepository>,
    pub items: Arc<dyn ItemRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub subscribers: Arc<dyn SubscriberRepository>,
    pub creem: Option<Arc<dyn CheckoutProvider>>,
    pub stripe: Option<Arc<dyn CheckoutProvider>>,
    pub pricing: CheckoutPricing,
    pub webhook_verifier: Option<Arc<CreemWebhookVerifier>>,
    pub mailer: Option<Arc<dyn EmailSender>>,
    pub audience: Option<Arc<dyn NewsletterAudience>>,
}

impl AppState {
    /// State backed by one content store, with no optional collaborators.
    pub fn new<S>(app_url: impl Into<String>, sessions: SessionCodec, store: Arc<S>) -> Self
    where
        S: UserRepository + ItemRepository + OrderRepository + SubscriberRepository + 'static,
    {
        Self {
            app_url: app_url.into(),
            secure_cookies: false,
            sessions,
            oauth: HashMap::new(),
            users: store.clone(),
            items: store.clone(),
            orders: store.clone(),
            subscribers: store,
            creem: None,
            stripe: None,
            pricing: CheckoutPricing::default(),
            webhook_verifier: None,
            mailer: None,
            audience: None,
        }
    }

    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }

    pub fn with_oauth(mut self, provider: Arc<dyn OAuthProvider>) -> Self {
        self.oauth.insert(provider.kind(), provider);
        self
    }

    pub fn with_creem(mut self, creem: Arc<dyn CheckoutProvider>) -> Self {
        self.creem = Some(creem);
        self
    }

    pub fn with_stripe(mut self, stripe: Arc<dyn CheckoutProvider>) -> Self {
        self.stripe = Some(stripe);
        self
    }

    pub fn with_pricing(mut self, pricing: CheckoutPricing) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn with_webhook_secret(mut self, secret: impl Into<String>) -> Self {
        self.webhook_verifier = Some(Arc::new(CreemWebhookVerifier::new(secret)));
        self
    }

    pub fn with_mailer(mut self, mailer: Arc<dyn EmailSender>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn with_audience(mut self, audience: Arc<dyn NewsletterAudience>) -> Self {
        self.audience = Some(audience);
        self
    }

    pub fn oauth_provider(
        &self,
        kind: OAuthProviderKind,
    ) -> Result<Arc<dyn OAuthProvider>, OAuthError> {
        self.oauth
            .get(&kind)
            .cloned()
            .ok_or(OAuthError::ProviderNotConfigured(kind))
    }

    // Handlers are created on demand from the shared state.

    pub fn begin_sign_in_handler(
        &self,
        kind: OAuthProviderKind,
    ) -> Result<BeginSignInHandler, OAuthError> {
        Ok(BeginSignInHandler::new(self.oauth_provider(kind)?))
    }

    pub fn complete_sign_in_handler(
        &self,
        kind: OAuthProviderKind,
    ) -> Result<CompleteSignInHandler, OAuthError> {
        Ok(CompleteSignInHandler::new(
            self.oauth_provider(kind)?,
            self.users.clone(),
        ))
    }

    pub fn create_checkout_handler(&self) -> CreateCheckoutHandler {
        CreateCheckoutHandler::new(
            self.creem.clone(),
            self.stripe.clone(),
            self.pricing.clone(),
            self.app_url.clone(),
        )
    }

    pub fn create_creem_checkout_handler(&self) -> CreateCreemCheckoutHandler {
        CreateCreemCheckoutHandler::new(self.creem.clone(), self.app_url.clone())
    }

    pub fn creem_webhook_handler(&self) -> HandleCreemWebhookHandler {
        HandleCreemWebhookHandler::new(
            self.webhook_verifier.clone(),
            self.orders.clone(),
            self.items.clone(),
            self.mailer.clone(),
            self.app_url.clone(),
        )
    }

    pub fn subscribe_handler(&self) -> SubscribeHandler {
        SubscribeHandler::new(
            self.audience.clone(),
            self.subscribers.clone(),
            self.mailer.clone(),
            self.app_url.clone(),
        )
    }

    pub fn unsubscribe_handler(&self) -> UnsubscribeHandler {
        UnsubscribeHandler::new(self.audience.clone())
    }

    pub fn submit_item_handler(&self) -> SubmitItemHandler {
        SubmitItemHandler::new(
            self.items.clone(),
            self.stripe.clone(),
            self.pricing.clone(),
            self.app_url.clone(),
        )
    }

    pub fn list_items_handler(&self) -> ListItemsHandler {
        ListItemsHandler::new(self.items.clone())
    }

    pub fn get_item_handler(&self) -> GetItemHandler {
        GetItemHandler::new(self.items.clone())
    }
}
