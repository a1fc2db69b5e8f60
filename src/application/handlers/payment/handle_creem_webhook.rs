//! HandleCreemWebhookHandler - verifies and reconciles Creem webhook deliveries.
//!
//! A completed checkout records an Order and marks the Item paid. Redelivered
//! events are recognised by the provider order id and record nothing new.

use std::sync::Arc;

use crate::application::emails;
use crate::domain::catalog::{ItemPaymentUpdate, NewOrder, Order, OrderStatus};
use crate::domain::foundation::{ItemId, Timestamp, UserId};
use crate::domain::payment::{
    AccessChange, CheckoutCompleted, CreemEvent, CreemWebhookVerifier, PaymentProviderKind,
    SubscriptionEventKind, SubscriptionObject, WebhookError,
};
use crate::ports::{EmailSender, ItemRepository, OrderRepository, StoreError};

/// Raw delivery as received.
#[derive(Debug, Clone, Default)]
pub struct HandleCreemWebhookCommand {
    pub payload: Vec<u8>,
    /// Value of the `creem-signature` header.
    pub signature: Option<String>,
}

/// What the delivery caused.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookOutcome {
    /// New Order recorded and Item marked paid.
    OrderRecorded(Order),
    /// Redelivery; the Item patch was re-applied to the existing Order.
    OrderAlreadyRecorded(Order),
    /// Checkout without `userId`/`itemId` metadata; nothing to reconcile.
    MissingMetadata,
    /// Subscription, refund or dispute event; logged only.
    Logged,
    /// Event type we do not handle.
    Ignored,
}

pub struct HandleCreemWebhookHandler {
    verifier: Option<Arc<CreemWebhookVerifier>>,
    orders: Arc<dyn OrderRepository>,
    items: Arc<dyn ItemRepository>,
    mailer: Option<Arc<dyn EmailSender>>,
    app_url: String,
}

impl HandleCreemWebhookHandler {
    pub fn new(
        verifier: Option<Arc<CreemWebhookVerifier>>,
        orders: Arc<dyn OrderRepository>,
        items: Arc<dyn ItemRepository>,
        mailer: Option<Arc<dyn EmailSender>>,
        app_url: impl Into<String>,
    ) -> Self {
        Self {
            verifier,
            orders,
            items,
            mailer,
            app_url: app_url.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: HandleCreemWebhookCommand,
    ) -> Result<WebhookOutcome, WebhookError> {
        let signature = cmd
            .signature
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(WebhookError::MissingSignature)?;
        if cmd.payload.is_empty() {
            return Err(WebhookError::MissingSignature);
        }

        let verifier = self.verifier.as_ref().ok_or_else(|| {
            tracing::error!("Creem webhook received but no webhook secret is configured");
            WebhookError::NotConfigured
        })?;

        let event = verifier.verify_and_parse(&cmd.payload, signature)?;
        tracing::info!(event_id = %event.id, event_type = event.event_type(), "Creem webhook received");

        match event.event {
            CreemEvent::CheckoutCompleted(checkout) => self.checkout_completed(&checkout).await,
            CreemEvent::Subscription { kind, subscription } => {
                log_subscription(kind, &subscription);
                Ok(WebhookOutcome::Logged)
            }
            CreemEvent::RefundCreated(refund) => {
                tracing::info!(refund_id = %refund.id, "Creem refund created");
                Ok(WebhookOutcome::Logged)
            }
            CreemEvent::DisputeCreated(dispute) => {
                tracing::warn!(dispute_id = %dispute.id, "Creem dispute created");
                Ok(WebhookOutcome::Logged)
            }
            CreemEvent::Unknown { event_type } => {
                tracing::info!(event_type = %event_type, "Unhandled Creem event type");
                Ok(WebhookOutcome::Ignored)
            }
        }
    }

    async fn checkout_completed(
        &self,
        checkout: &CheckoutCompleted,
    ) -> Result<WebhookOutcome, WebhookError> {
        let ids = (
            checkout.metadata.user_id.as_deref().and_then(|id| UserId::new(id).ok()),
            checkout.metadata.item_id.as_deref().and_then(|id| ItemId::new(id).ok()),
        );
        let (Some(user_id), Some(item_id)) = ids else {
            tracing::warn!(checkout_id = %checkout.id, "Checkout completed without userId/itemId metadata");
            return Ok(WebhookOutcome::MissingMetadata);
        };

        let plan = checkout.resolved_plan();
        let external_order_id = checkout.external_order_id();

        let existing = self
            .orders
            .find_by_external_id(external_order_id)
            .await
            .map_err(processing)?;

        let (order, first_recording) = match existing {
            Some(order) => {
                tracing::info!(
                    order_id = %order.id,
                    external_order_id,
                    "Checkout already recorded; re-applying item update"
                );
                (order, false)
            }
            None => {
                let order = self
                    .orders
                    .create(NewOrder {
                        user: user_id.clone(),
                        item: item_id.clone(),
                        status: OrderStatus::Success,
                        provider: PaymentProviderKind::Creem,
                        external_order_id: external_order_id.to_string(),
                        date: Timestamp::now(),
                    })
                    .await
                    .map_err(processing)?;
                (order, true)
            }
        };

        self.items
            .apply_payment(&item_id, &ItemPaymentUpdate::new(plan, order.id.clone()))
            .await
            .map_err(processing)?;

        tracing::info!(
            order_id = %order.id,
            user_id = %user_id,
            item_id = %item_id,
            plan = %plan,
            "Creem checkout reconciled"
        );

        if !first_recording {
            return Ok(WebhookOutcome::OrderAlreadyRecorded(order));
        }

        self.send_receipt(checkout, &item_id).await;
        Ok(WebhookOutcome::OrderRecorded(order))
    }

    async fn send_receipt(&self, checkout: &CheckoutCompleted, item_id: &ItemId) {
        let Some(email) = checkout.customer_email() else {
            return;
        };
        let Some(mailer) = &self.mailer else {
            tracing::warn!("No email sender configured; skipping payment confirmation");
            return;
        };
        let name = checkout.customer_name().unwrap_or(email);
        let link = format!("{}/publish/{}", self.app_url, item_id);
        if let Err(e) = mailer.send(emails::payment_success(name, email, &link)).await {
            tracing::error!(item_id = %item_id, error = %e, "Failed to send payment confirmation");
        }
    }
}

fn processing(e: StoreError) -> WebhookError {
    tracing::error!(error = %e, "Creem webhook reconciliation failed");
    WebhookError::Processing(e.to_string())
}

fn log_subscription(kind: SubscriptionEventKind, subscription: &SubscriptionObject) {
    let user_id = subscription.user_id().unwrap_or("unknown");
    match kind.access_change() {
        Some(AccessChange::Grant) => tracing::info!(
            event_type = kind.as_str(),
            subscription_id = %subscription.id,
            user_id,
            "Subscription grants access"
        ),
        Some(AccessChange::Revoke) => tracing::info!(
            event_type = kind.as_str(),
            subscription_id = %subscription.id,
            user_id,
            "Subscription revokes access"
        ),
        None => tracing::info!(
            event_type = kind.as_str(),
            subscription_id = %subscription.id,
            status = subscription.status.as_deref().unwrap_or("unknown"),
            "Subscription updated"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::email::MockEmailSender;
    use crate::adapters::memory::{InMemoryStore, ItemRecord};
    use crate::domain::catalog::{PlanStatus, PricePlan};
    use crate::domain::payment::sign_payload;
    use serde_json::json;

    const SECRET: &str = "whsec_test";

    struct Fixture {
        store: Arc<InMemoryStore>,
        mailer: Arc<MockEmailSender>,
        handler: HandleCreemWebhookHandler,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        store.insert_item(ItemRecord::published("item-1", "Tool", "2024-01-01"));
        let mailer = Arc::new(MockEmailSender::new());
        let handler = HandleCreemWebhookHandler::new(
            Some(Arc::new(CreemWebhookVerifier::new(SECRET))),
            store.clone(),
            store.clone(),
            Some(mailer.clone()),
            "https://dir.example",
        );
        Fixture {
            store,
            mailer,
            handler,
        }
    }

    fn signed(body: serde_json::Value) -> HandleCreemWebhookCommand {
        let payload = serde_json::to_vec(&body).unwrap();
        HandleCreemWebhookCommand {
            signature: Some(sign_payload(SECRET, &payload)),
            payload,
        }
    }

    fn checkout_event(metadata: serde_json::Value) -> HandleCreemWebhookCommand {
        checkout_event_for("Sponsor listing", metadata)
    }

    fn checkout_event_for(product_name: &str, metadata: serde_json::Value) -> HandleCreemWebhookCommand {
        signed(json!({
            "id": "evt_1",
            "eventType": "checkout.completed",
            "object": {
                "id": "ch_1",
                "order": {"id": "ord_1"},
                "product": {"id": "prod_1", "name": product_name},
                "customer": {"id": "cus_1", "email": "ada@example.com", "name": "Ada"},
                "metadata": metadata
            }
        }))
    }

    fn full_metadata() -> serde_json::Value {
        json!({"userId": "user-1", "itemId": "item-1", "pricePlan": "pro"})
    }

    #[tokio::test]
    async fn checkout_records_order_and_marks_item_paid() {
        let fx = fixture();

        let outcome = fx.handler.handle(checkout_event(full_metadata())).await.unwrap();

        let WebhookOutcome::OrderRecorded(order) = outcome else {
            panic!("expected a new order, got {outcome:?}");
        };
        assert_eq!(order.external_order_id, "ord_1");
        assert_eq!(order.provider, PaymentProviderKind::Creem);
        assert_eq!(order.user.as_str(), "user-1");

        let item = fx.store.item("item-1").unwrap();
        assert!(item.paid);
        assert!(item.featured);
        assert_eq!(item.price_plan, PricePlan::Pro);
        assert_eq!(item.pro_plan_status, Some(PlanStatus::Success));
        assert_eq!(item.sponsor_plan_status, Some(PlanStatus::Submitting));
        assert_eq!(item.order.as_ref(), Some(&order.id));

        let sent = fx.mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "ada@example.com");
        assert!(sent[0].html.contains("https://dir.example/publish/item-1"));
    }

    #[tokio::test]
    async fn redelivery_records_exactly_one_order() {
        let fx = fixture();

        fx.handler.handle(checkout_event(full_metadata())).await.unwrap();
        let second = fx.handler.handle(checkout_event(full_metadata())).await.unwrap();

        assert!(matches!(second, WebhookOutcome::OrderAlreadyRecorded(_)));
        assert_eq!(fx.store.orders().len(), 1);
        assert_eq!(fx.mailer.sent().len(), 1);
    }

    #[tokio::test]
    async fn plan_falls_back_to_product_name() {
        let fx = fixture();
        fx.handler
            .handle(checkout_event(json!({"userId": "user-1", "itemId": "item-1"})))
            .await
            .unwrap();
        let item = fx.store.item("item-1").unwrap();
        assert!(item.sponsor);
        assert_eq!(item.sponsor_plan_status, Some(PlanStatus::Success));
    }

    #[tokio::test]
    async fn metadata_plan_wins_over_neutral_product_name() {
        let fx = fixture();
        fx.handler
            .handle(checkout_event_for(
                "Listing upgrade",
                json!({"userId": "user-1", "itemId": "item-1", "pricePlan": "sponsor"}),
            ))
            .await
            .unwrap();

        let item = fx.store.item("item-1").unwrap();
        assert_eq!(item.price_plan, PricePlan::Sponsor);
        assert!(item.sponsor);
        assert_eq!(item.sponsor_plan_status, Some(PlanStatus::Success));
        assert_eq!(item.pro_plan_status, Some(PlanStatus::Submitting));
    }

    #[tokio::test]
    async fn missing_metadata_is_acknowledged() {
        let fx = fixture();
        let outcome = fx
            .handler
            .handle(checkout_event(json!({"userId": "user-1"})))
            .await
            .unwrap();
        assert_eq!(outcome, WebhookOutcome::MissingMetadata);
        assert!(fx.store.orders().is_empty());
    }

    #[tokio::test]
    async fn missing_signature_checked_before_configuration() {
        let store = Arc::new(InMemoryStore::new());
        let handler =
            HandleCreemWebhookHandler::new(None, store.clone(), store, None, "https://dir.example");
        let cmd = HandleCreemWebhookCommand {
            payload: b"{}".to_vec(),
            signature: None,
        };
        assert_eq!(
            handler.handle(cmd).await.unwrap_err(),
            WebhookError::MissingSignature
        );

        let cmd = HandleCreemWebhookCommand {
            payload: b"{}".to_vec(),
            signature: Some("abcd".to_string()),
        };
        assert_eq!(handler.handle(cmd).await.unwrap_err(), WebhookError::NotConfigured);
    }

    #[tokio::test]
    async fn tampered_signature_is_rejected() {
        let fx = fixture();
        let mut cmd = checkout_event(full_metadata());
        cmd.signature = Some(sign_payload("whsec_other", &cmd.payload));
        assert_eq!(
            fx.handler.handle(cmd).await.unwrap_err(),
            WebhookError::InvalidSignature
        );
        assert!(fx.store.orders().is_empty());
    }

    #[tokio::test]
    async fn store_failure_is_processing_error() {
        let fx = fixture();
        fx.store.fail_next(StoreError::Request("down".to_string()));
        let result = fx.handler.handle(checkout_event(full_metadata())).await;
        assert!(matches!(result, Err(WebhookError::Processing(_))));
    }

    #[tokio::test]
    async fn email_failure_does_not_fail_webhook() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_item(ItemRecord::published("item-1", "Tool", "2024-01-01"));
        let mailer = MockEmailSender::failing(crate::ports::EmailError::Request("smtp".to_string()));
        let handler = HandleCreemWebhookHandler::new(
            Some(Arc::new(CreemWebhookVerifier::new(SECRET))),
            store.clone(),
            store.clone(),
            Some(Arc::new(mailer)),
            "https://dir.example",
        );
        let outcome = handler.handle(checkout_event(full_metadata())).await.unwrap();
        assert!(matches!(outcome, WebhookOutcome::OrderRecorded(_)));
    }

    #[tokio::test]
    async fn subscription_and_unknown_events_are_acknowledged() {
        let fx = fixture();
        let outcome = fx
            .handler
            .handle(signed(json!({
                "id": "evt_2",
                "eventType": "subscription.paused",
                "object": {"id": "sub_1", "status": "paused", "metadata": {"userId": "user-1"}}
            })))
            .await
            .unwrap();
        assert_eq!(outcome, WebhookOutcome::Logged);

        let outcome = fx
            .handler
            .handle(signed(json!({"id": "evt_3", "eventType": "payment.unknown", "object": {}})))
            .await
            .unwrap();
        assert_eq!(outcome, WebhookOutcome::Ignored);
        assert!(fx.store.orders().is_empty());
    }
}
