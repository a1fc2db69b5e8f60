//! Content store repositories backed by Sanity.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::client::{QueryParams, SanityClient};
use super::documents;
use super::groq;
use crate::domain::catalog::{
    ItemDetail, ItemListQuery, ItemPage, ItemPaymentUpdate, ItemSummary, NewItem, NewOrder,
    NewSubscriber, NewUser, Order, OrderStatus, SubmittedItem, Subscriber, SubscriberStatus, User,
};
use crate::domain::foundation::{
    prefixed_document_id, ItemId, OrderId, Timestamp, UserId, ValidationError,
};
use crate::domain::payment::PaymentProviderKind;
use crate::ports::{
    ItemRepository, OrderRepository, StoreError, SubscriberRepository, UserRepository,
};

/// Implements every content store port over one [`SanityClient`].
#[derive(Clone)]
pub struct SanityStore {
    client: SanityClient,
}

impl SanityStore {
    pub fn new(client: SanityClient) -> Self {
        Self { client }
    }
}

fn params(entries: &[(&str, &str)]) -> QueryParams {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), json!(v)))
        .collect()
}

fn invalid_id(err: ValidationError) -> StoreError {
    StoreError::Decode(err.to_string())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderRow {
    #[serde(rename = "_id")]
    id: OrderId,
    user: UserId,
    item: ItemId,
    status: OrderStatus,
    provider: PaymentProviderKind,
    external_order_id: String,
    date: Timestamp,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            id: row.id,
            user: row.user,
            item: row.item,
            status: row.status,
            provider: row.provider,
            external_order_id: row.external_order_id,
            date: row.date,
        }
    }
}

#[async_trait]
impl UserRepository for SanityStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.client
            .fetch(groq::USER_BY_EMAIL, &params(&[("email", email)]))
            .await
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let raw_id = self.client.create(documents::user_document(&user)).await?;
        let id = UserId::new(raw_id).map_err(invalid_id)?;
        tracing::info!(user_id = %id, provider = %user.provider, "User created");
        Ok(User {
            id,
            name: Some(user.name),
            email: user.email,
            image: user.image,
            role: Some(user.role),
        })
    }

    async fn set_image(&self, id: &UserId, image: &str) -> Result<(), StoreError> {
        self.client
            .patch(id.as_str(), json!({ "image": image }), &[])
            .await
    }
}

#[async_trait]
impl ItemRepository for SanityStore {
    async fn create(&self, item: NewItem) -> Result<SubmittedItem, StoreError> {
        let id = prefixed_document_id("item");
        self.client
            .create(documents::item_document(&id, &item))
            .await?;
        Ok(SubmittedItem {
            id: ItemId::new(id).map_err(invalid_id)?,
            name: item.name,
            slug: item.slug,
            price_plan: item.price_plan,
        })
    }

    async fn apply_payment(
        &self,
        id: &ItemId,
        update: &ItemPaymentUpdate,
    ) -> Result<(), StoreError> {
        self.client
            .patch(id.as_str(), documents::item_payment_patch(update), &[])
            .await
    }

    async fn list(&self, query: &ItemListQuery) -> Result<ItemPage, StoreError> {
        let queries = groq::list_queries(query);
        let total: u64 = self.client.fetch(&queries.count, &queries.params).await?;
        let items: Vec<ItemSummary> = self.client.fetch(&queries.page, &queries.params).await?;
        Ok(ItemPage { items, total })
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ItemDetail>, StoreError> {
        self.client
            .fetch(&groq::item_by_slug_query(), &params(&[("slug", slug)]))
            .await
    }
}

#[async_trait]
impl OrderRepository for SanityStore {
    async fn create(&self, order: NewOrder) -> Result<Order, StoreError> {
        let raw_id = self.client.create(documents::order_document(&order)).await?;
        let id = OrderId::new(raw_id).map_err(invalid_id)?;
        Ok(Order::from_new(id, order))
    }

    async fn find_by_external_id(
        &self,
        external_order_id: &str,
    ) -> Result<Option<Order>, StoreError> {
        let row: Option<OrderRow> = self
            .client
            .fetch(
                groq::ORDER_BY_EXTERNAL_ID,
                &params(&[("externalOrderId", external_order_id)]),
            )
            .await?;
        Ok(row.map(Order::from))
    }
}

#[async_trait]
impl SubscriberRepository for SanityStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Subscriber>, StoreError> {
        self.client
            .fetch(groq::SUBSCRIBER_BY_EMAIL, &params(&[("email", email)]))
            .await
    }

    async fn create(&self, subscriber: NewSubscriber) -> Result<Subscriber, StoreError> {
        let id = prefixed_document_id("subscriber");
        self.client
            .create(documents::subscriber_document(&id, &subscriber))
            .await?;
        Ok(Subscriber {
            id,
            email: subscriber.email,
            status: SubscriberStatus::Active,
        })
    }

    async fn reactivate(&self, id: &str) -> Result<(), StoreError> {
        self.client
            .patch(
                id,
                documents::subscriber_reactivation(Timestamp::now()),
                &["unsubscribedAt"],
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_row_reads_projection() {
        let row: OrderRow = serde_json::from_value(json!({
            "_id": "order.1",
            "user": "user-1",
            "item": "item-1",
            "status": "success",
            "provider": "creem",
            "externalOrderId": "ord_1",
            "date": "2024-01-01T00:00:00.000Z"
        }))
        .unwrap();
        let order = Order::from(row);
        assert_eq!(order.id.as_str(), "order.1");
        assert_eq!(order.provider, PaymentProviderKind::Creem);
        assert_eq!(order.date.as_unix_secs(), 1_704_067_200);
    }

    #[test]
    fn params_encode_strings() {
        let p = params(&[("email", "ada@example.com")]);
        assert_eq!(p["email"], json!("ada@example.com"));
    }
}
