//! JSON documents and patches written to the content store.

use serde_json::{json, Map, Value};

use crate::domain::catalog::{ItemPaymentUpdate, NewItem, NewOrder, NewSubscriber, NewUser, SubscriberStatus};
use crate::domain::foundation::Timestamp;

fn reference(id: &str) -> Value {
    json!({ "_type": "reference", "_ref": id })
}

/// Array member reference; arrays of objects need a unique `_key`.
fn keyed_reference(id: &str) -> Value {
    json!({
        "_type": "reference",
        "_ref": id,
        "_key": uuid::Uuid::new_v4().simple().to_string(),
    })
}

fn image(asset: &str, alt: String) -> Value {
    json!({
        "_type": "image",
        "alt": alt,
        "asset": reference(asset),
    })
}

pub fn user_document(user: &NewUser) -> Value {
    json!({
        "_type": "user",
        "name": user.name,
        "email": user.email,
        "emailVerified": user.email_verified.to_rfc3339(),
        "image": user.image,
        "role": user.role,
        "provider": user.provider,
        "providerId": user.provider_id,
    })
}

pub fn item_document(id: &str, item: &NewItem) -> Value {
    let mut doc = Map::new();
    doc.insert("_type".to_string(), json!("item"));
    doc.insert("_id".to_string(), json!(id));
    doc.insert("name".to_string(), json!(item.name));
    doc.insert(
        "slug".to_string(),
        json!({ "_type": "slug", "current": item.slug }),
    );
    doc.insert("link".to_string(), json!(item.link));
    doc.insert("description".to_string(), json!(item.description));
    if let Some(introduction) = &item.introduction {
        doc.insert("introduction".to_string(), json!(introduction));
    }
    doc.insert("pricePlan".to_string(), json!(item.price_plan));
    doc.insert(
        "categories".to_string(),
        Value::Array(item.categories.iter().map(|c| keyed_reference(c)).collect()),
    );
    if !item.tags.is_empty() {
        doc.insert(
            "tags".to_string(),
            Value::Array(item.tags.iter().map(|t| keyed_reference(t)).collect()),
        );
    }
    for (field, status) in item.plan_statuses() {
        if let Some(status) = status {
            doc.insert(field.to_string(), json!(status));
        }
    }
    if let Some(asset) = &item.image_asset {
        doc.insert("image".to_string(), image(asset, format!("image of {}", item.name)));
    }
    if let Some(asset) = &item.icon_asset {
        doc.insert("icon".to_string(), image(asset, format!("icon of {}", item.name)));
    }
    doc.insert("submitter".to_string(), reference(item.submitter.as_str()));
    Value::Object(doc)
}

/// Fields set on an item once its checkout completes.
pub fn item_payment_patch(update: &ItemPaymentUpdate) -> Value {
    json!({
        "paid": true,
        "featured": true,
        "pricePlan": update.plan,
        "sponsor": update.sponsor(),
        "proPlanStatus": update.pro_plan_status(),
        "sponsorPlanStatus": update.sponsor_plan_status(),
        "order": reference(update.order.as_str()),
    })
}

pub fn order_document(order: &NewOrder) -> Value {
    json!({
        "_type": "order",
        "user": reference(order.user.as_str()),
        "item": reference(order.item.as_str()),
        "status": order.status,
        "provider": order.provider,
        "externalOrderId": order.external_order_id,
        "date": order.date.to_rfc3339(),
    })
}

pub fn subscriber_document(id: &str, subscriber: &NewSubscriber) -> Value {
    json!({
        "_type": "subscriber",
        "_id": id,
        "email": subscriber.email,
        "status": SubscriberStatus::Active,
        "source": subscriber.source,
        "subscribedAt": subscriber.subscribed_at.to_rfc3339(),
    })
}

pub fn subscriber_reactivation(now: Timestamp) -> Value {
    json!({
        "status": SubscriberStatus::Active,
        "subscribedAt": now.to_rfc3339(),
    })
}
