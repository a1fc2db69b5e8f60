//! Creem webhook events, decoded once into typed variants.
//!
//! Envelope: `{ "id", "eventType", "created_at", "object": { ... } }`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;

use super::webhook_errors::WebhookError;
use crate::domain::catalog::PricePlan;
use crate::domain::foundation::Timestamp;

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    id: String,
    #[serde(rename = "eventType")]
    event_type: String,
    #[serde(default)]
    created_at: Option<i64>,
    #[serde(default)]
    object: serde_json::Value,
}

/// A verified webhook delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct CreemWebhookEvent {
    pub id: String,
    pub created_at: Option<Timestamp>,
    pub event: CreemEvent,
}

impl CreemWebhookEvent {
    /// Decodes the JSON body into a typed event.
    pub fn parse(payload: &[u8]) -> Result<Self, WebhookError> {
        let raw: RawEnvelope = serde_json::from_slice(payload)
            .map_err(|e| WebhookError::ParseError(e.to_string()))?;

        let event = CreemEvent::from_parts(&raw.event_type, raw.object)?;

        Ok(Self {
            id: raw.id,
            created_at: raw.created_at.and_then(Timestamp::from_unix_millis),
            event,
        })
    }

    pub fn event_type(&self) -> &str {
        self.event.event_type()
    }
}

/// Typed Creem event.
#[derive(Debug, Clone, PartialEq)]
pub enum CreemEvent {
    CheckoutCompleted(CheckoutCompleted),
    Subscription {
        kind: SubscriptionEventKind,
        subscription: SubscriptionObject,
    },
    RefundCreated(ResourceRef),
    DisputeCreated(ResourceRef),
    /// Acknowledged without processing.
    Unknown { event_type: String },
}

impl CreemEvent {
    fn from_parts(event_type: &str, object: serde_json::Value) -> Result<Self, WebhookError> {
        let event = match event_type {
            "checkout.completed" => CreemEvent::CheckoutCompleted(decode(object)?),
            "refund.created" => CreemEvent::RefundCreated(decode(object)?),
            "dispute.created" => CreemEvent::DisputeCreated(decode(object)?),
            other => match SubscriptionEventKind::parse(other) {
                Some(kind) => CreemEvent::Subscription {
                    kind,
                    subscription: decode(object)?,
                },
                None => CreemEvent::Unknown {
                    event_type: other.to_string(),
                },
            },
        };
        Ok(event)
    }

    pub fn event_type(&self) -> &str {
        match self {
            CreemEvent::CheckoutCompleted(_) => "checkout.completed",
            CreemEvent::Subscription { kind, .. } => kind.as_str(),
            CreemEvent::RefundCreated(_) => "refund.created",
            CreemEvent::DisputeCreated(_) => "dispute.created",
            CreemEvent::Unknown { event_type } => event_type,
        }
    }
}

fn decode<T: DeserializeOwned>(object: serde_json::Value) -> Result<T, WebhookError> {
    serde_json::from_value(object).map_err(|e| WebhookError::ParseError(e.to_string()))
}

/// A nested object that Creem sends either expanded or as a bare id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Expandable<T> {
    Object(T),
    Id(String),
}

impl<T> Expandable<T> {
    pub fn as_object(&self) -> Option<&T> {
        match self {
            Expandable::Object(obj) => Some(obj),
            Expandable::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreemOrder {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreemProduct {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreemCustomer {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Metadata attached when the checkout was created.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CheckoutMetadata {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
    #[serde(rename = "itemId", default)]
    pub item_id: Option<String>,
    #[serde(rename = "pricePlan", default)]
    pub price_plan: Option<String>,
}

/// Payload of `checkout.completed`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckoutCompleted {
    pub id: String,
    #[serde(default)]
    pub order: Option<Expandable<CreemOrder>>,
    #[serde(default)]
    pub product: Option<Expandable<CreemProduct>>,
    #[serde(default)]
    pub customer: Option<Expandable<CreemCustomer>>,
    #[serde(default, deserialize_with = "metadata_or_default")]
    pub metadata: CheckoutMetadata,
}

fn metadata_or_default<'de, D>(deserializer: D) -> Result<CheckoutMetadata, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<CheckoutMetadata>::deserialize(deserializer)?.unwrap_or_default())
}

impl CheckoutCompleted {
    /// Plan from metadata, else inferred from the product name.
    pub fn resolved_plan(&self) -> PricePlan {
        if let Some(plan) = self
            .metadata
            .price_plan
            .as_deref()
            .and_then(PricePlan::parse_paid)
        {
            return plan;
        }
        let product_name = self
            .product
            .as_ref()
            .and_then(Expandable::as_object)
            .and_then(|p| p.name.as_deref())
            .unwrap_or_default();
        if product_name.to_lowercase().contains("sponsor") {
            PricePlan::Sponsor
        } else {
            PricePlan::Pro
        }
    }

    /// Provider order id, falling back to the checkout id.
    pub fn external_order_id(&self) -> &str {
        match self.order.as_ref() {
            Some(Expandable::Object(order)) => &order.id,
            Some(Expandable::Id(id)) => id,
            None => &self.id,
        }
    }

    pub fn customer_email(&self) -> Option<&str> {
        self.customer
            .as_ref()
            .and_then(Expandable::as_object)
            .and_then(|c| c.email.as_deref())
            .filter(|e| !e.is_empty())
    }

    pub fn customer_name(&self) -> Option<&str> {
        self.customer
            .as_ref()
            .and_then(Expandable::as_object)
            .and_then(|c| c.name.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionEventKind {
    Active,
    Trialing,
    Paid,
    Canceled,
    Expired,
    Unpaid,
    PastDue,
    Paused,
    Update,
}

/// Access decision implied by a subscription event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessChange {
    Grant,
    Revoke,
}

impl SubscriptionEventKind {
    fn parse(event_type: &str) -> Option<Self> {
        let kind = match event_type {
            "subscription.active" => SubscriptionEventKind::Active,
            "subscription.trialing" => SubscriptionEventKind::Trialing,
            "subscription.paid" => SubscriptionEventKind::Paid,
            "subscription.canceled" => SubscriptionEventKind::Canceled,
            "subscription.expired" => SubscriptionEventKind::Expired,
            "subscription.unpaid" => SubscriptionEventKind::Unpaid,
            "subscription.past_due" => SubscriptionEventKind::PastDue,
            "subscription.paused" => SubscriptionEventKind::Paused,
            "subscription.update" => SubscriptionEventKind::Update,
            _ => return None,
        };
        Some(kind)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionEventKind::Active => "subscription.active",
            SubscriptionEventKind::Trialing => "subscription.trialing",
            SubscriptionEventKind::Paid => "subscription.paid",
            SubscriptionEventKind::Canceled => "subscription.canceled",
            SubscriptionEventKind::Expired => "subscription.expired",
            SubscriptionEventKind::Unpaid => "subscription.unpaid",
            SubscriptionEventKind::PastDue => "subscription.past_due",
            SubscriptionEventKind::Paused => "subscription.paused",
            SubscriptionEventKind::Update => "subscription.update",
        }
    }

    pub fn access_change(&self) -> Option<AccessChange> {
        match self {
            SubscriptionEventKind::Active
            | SubscriptionEventKind::Trialing
            | SubscriptionEventKind::Paid => Some(AccessChange::Grant),
            SubscriptionEventKind::Paused | SubscriptionEventKind::Expired => {
                Some(AccessChange::Revoke)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubscriptionObject {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub product: Option<Expandable<CreemProduct>>,
    #[serde(default)]
    pub customer: Option<Expandable<CreemCustomer>>,
    #[serde(default)]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

impl SubscriptionObject {
    pub fn user_id(&self) -> Option<&str> {
        self.metadata.as_ref()?.get("userId")?.as_str()
    }
}

/// Refunds and disputes are only identified, not processed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResourceRef {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(event_type: &str, object: serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "id": "evt_1",
            "eventType": event_type,
            "created_at": 1728734325927i64,
            "object": object,
        }))
        .unwrap()
    }

    fn checkout(metadata: serde_json::Value, product_name: &str) -> CheckoutCompleted {
        let payload = envelope(
            "checkout.completed",
            json!({
                "id": "ch_1",
                "order": {"id": "ord_1", "amount": 1900},
                "product": {"id": "prod_1", "name": product_name},
                "customer": {"id": "cust_1", "email": "buyer@example.com", "name": "Buyer"},
                "metadata": metadata,
            }),
        );
        match CreemWebhookEvent::parse(&payload).unwrap().event {
            CreemEvent::CheckoutCompleted(c) => c,
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn parses_checkout_completed() {
        let c = checkout(json!({"userId": "u1", "itemId": "i1", "pricePlan": "pro"}), "Pro");
        assert_eq!(c.metadata.user_id.as_deref(), Some("u1"));
        assert_eq!(c.metadata.item_id.as_deref(), Some("i1"));
        assert_eq!(c.external_order_id(), "ord_1");
        assert_eq!(c.customer_email(), Some("buyer@example.com"));
        assert_eq!(c.customer_name(), Some("Buyer"));
    }

    #[test]
    fn plan_comes_from_metadata_first() {
        let c = checkout(json!({"pricePlan": "pro"}), "Sponsor Listing");
        assert_eq!(c.resolved_plan(), PricePlan::Pro);
    }

    #[test]
    fn plan_falls_back_to_product_name() {
        assert_eq!(checkout(json!({}), "Directory SPONSOR slot").resolved_plan(), PricePlan::Sponsor);
        assert_eq!(checkout(json!({}), "Pro Listing").resolved_plan(), PricePlan::Pro);
        assert_eq!(checkout(json!(null), "").resolved_plan(), PricePlan::Pro);
    }

    #[test]
    fn external_id_falls_back_to_checkout_id() {
        let payload = envelope("checkout.completed", json!({"id": "ch_9", "order": "ord_9"}));
        let CreemEvent::CheckoutCompleted(c) = CreemWebhookEvent::parse(&payload).unwrap().event
        else {
            panic!("expected checkout");
        };
        assert_eq!(c.external_order_id(), "ord_9");

        let payload = envelope("checkout.completed", json!({"id": "ch_9"}));
        let CreemEvent::CheckoutCompleted(c) = CreemWebhookEvent::parse(&payload).unwrap().event
        else {
            panic!("expected checkout");
        };
        assert_eq!(c.external_order_id(), "ch_9");
        assert!(c.customer_email().is_none());
    }

    #[test]
    fn parses_subscription_events() {
        let payload = envelope(
            "subscription.paused",
            json!({"id": "sub_1", "status": "paused", "metadata": {"userId": "u1"}}),
        );
        let event = CreemWebhookEvent::parse(&payload).unwrap();
        assert_eq!(event.event_type(), "subscription.paused");
        match event.event {
            CreemEvent::Subscription { kind, subscription } => {
                assert_eq!(kind.access_change(), Some(AccessChange::Revoke));
                assert_eq!(subscription.user_id(), Some("u1"));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn classifies_access_changes() {
        assert_eq!(SubscriptionEventKind::Trialing.access_change(), Some(AccessChange::Grant));
        assert_eq!(SubscriptionEventKind::Canceled.access_change(), None);
    }

    #[test]
    fn unknown_event_types_are_kept() {
        let event = CreemWebhookEvent::parse(&envelope("payout.sent", json!({}))).unwrap();
        assert_eq!(
            event.event,
            CreemEvent::Unknown {
                event_type: "payout.sent".to_string()
            }
        );
        assert!(event.created_at.is_some());
    }

    #[test]
    fn malformed_payload_is_a_parse_error() {
        assert!(matches!(
            CreemWebhookEvent::parse(b"not json"),
            Err(WebhookError::ParseError(_))
        ));
        assert!(matches!(
            CreemWebhookEvent::parse(&envelope("checkout.completed", json!({"order": {}}))),
            Err(WebhookError::ParseError(_))
        ));
    }
}
