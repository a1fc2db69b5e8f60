//! Catalog domain - the documents the directory keeps in its content store.

mod errors;
mod item;
mod order;
mod plan;
mod subscriber;
mod user;

pub use errors::{CatalogError, NewsletterError};
pub use item::{
    slugify, ItemDetail, ItemFilter, ItemListQuery, ItemPage, ItemPaymentUpdate, ItemSort,
    ItemSummary, NewItem, SubmittedItem, Taxon, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use order::{NewOrder, Order, OrderStatus};
pub use plan::{PlanStatus, PricePlan};
pub use subscriber::{NewSubscriber, Subscriber, SubscriberStatus};
pub use user::{NewUser, User};
