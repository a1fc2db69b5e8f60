//! Content store ports.
//!
//! The headless CMS is the system of record for users, items, orders and
//! newsletter subscribers. Each document family gets its own repository
//! trait; one adapter may implement all of them.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::catalog::{
    ItemDetail, ItemListQuery, ItemPage, ItemPaymentUpdate, NewItem, NewOrder, NewSubscriber,
    NewUser, Order, SubmittedItem, Subscriber, User,
};
use crate::domain::foundation::{ItemId, UserId};

/// Content store failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached or rejected the request.
    #[error("Content store request failed: {0}")]
    Request(String),

    /// A response did not have the expected shape.
    #[error("Unexpected content store response: {0}")]
    Decode(String),

    #[error("Document not found: {0}")]
    NotFound(String),
}

/// Users, keyed by email.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    async fn set_image(&self, id: &UserId, image: &str) -> Result<(), StoreError>;
}

/// Directory items.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn create(&self, item: NewItem) -> Result<SubmittedItem, StoreError>;

    /// Marks an item paid and links it to its order.
    async fn apply_payment(
        &self,
        id: &ItemId,
        update: &ItemPaymentUpdate,
    ) -> Result<(), StoreError>;

    async fn list(&self, query: &ItemListQuery) -> Result<ItemPage, StoreError>;

    /// Visible item by slug, with related items.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ItemDetail>, StoreError>;
}

/// Payment orders. Append-only.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, order: NewOrder) -> Result<Order, StoreError>;

    async fn find_by_external_id(&self, external_order_id: &str)
        -> Result<Option<Order>, StoreError>;
}

/// Newsletter subscribers kept in the store.
#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Subscriber>, StoreError>;

    async fn create(&self, subscriber: NewSubscriber) -> Result<Subscriber, StoreError>;

    /// Sets status back to active and clears the unsubscribe date.
    async fn reactivate(&self, id: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repositories_are_object_safe() {
        fn _users(_: &dyn UserRepository) {}
        fn _items(_: &dyn ItemRepository) {}
        fn _orders(_: &dyn OrderRepository) {}
        fn _subscribers(_: &dyn SubscriberRepository) {}
    }

    #[test]
    fn store_error_messages() {
        assert_eq!(
            StoreError::NotFound("item.1".to_string()).to_string(),
            "Document not found: item.1"
        );
    }
}
