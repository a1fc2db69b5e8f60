//! In-memory content store.
//!
//! Implements every content store port over plain collections behind a
//! `Mutex`. Used by tests and local development without a CMS project.
//! Listing filters mirror the GROQ queries of the Sanity adapter; search is a
//! case-insensitive substring match.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::catalog::{
    ItemDetail, ItemFilter, ItemListQuery, ItemPage, ItemPaymentUpdate, ItemSort, ItemSummary,
    NewItem, NewOrder, NewSubscriber, NewUser, Order, PlanStatus, PricePlan, SubmittedItem,
    Subscriber, SubscriberStatus, Taxon, User,
};
use crate::domain::foundation::{prefixed_document_id, ItemId, OrderId, Timestamp, UserId};
use crate::ports::{
    ItemRepository, OrderRepository, StoreError, SubscriberRepository, UserRepository,
};

const RELATED_LIMIT: usize = 3;

/// Stored state of one item document.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub link: String,
    pub description: String,
    pub introduction: Option<String>,
    pub price_plan: PricePlan,
    /// Category ids
    pub categories: Vec<String>,
    /// Tag ids
    pub tags: Vec<String>,
    pub submitter: Option<UserId>,
    pub created_at: Timestamp,
    pub publish_date: Option<String>,
    pub featured: bool,
    pub sponsor: bool,
    pub force_hidden: bool,
    pub paid: bool,
    pub order: Option<OrderId>,
    pub free_plan_status: Option<PlanStatus>,
    pub pro_plan_status: Option<PlanStatus>,
    pub sponsor_plan_status: Option<PlanStatus>,
}

impl ItemRecord {
    /// A free, published item with no taxonomy.
    pub fn published(id: &str, name: &str, publish_date: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            slug: crate::domain::catalog::slugify(name),
            link: format!("https://{}.example", id),
            description: format!("{} description", name),
            introduction: None,
            price_plan: PricePlan::Free,
            categories: Vec::new(),
            tags: Vec::new(),
            submitter: None,
            created_at: Timestamp::now(),
            publish_date: Some(publish_date.to_string()),
            featured: false,
            sponsor: false,
            force_hidden: false,
            paid: false,
            order: None,
            free_plan_status: None,
            pro_plan_status: None,
            sponsor_plan_status: None,
        }
    }

    fn listed(&self) -> bool {
        self.publish_date.is_some() && !self.force_hidden && !self.sponsor
    }
}

#[derive(Default)]
struct StoreState {
    users: Vec<User>,
    items: Vec<ItemRecord>,
    taxa: HashMap<String, Taxon>,
    orders: Vec<Order>,
    subscribers: Vec<Subscriber>,
    next_error: Option<StoreError>,
    sequence: u64,
}

impl StoreState {
    fn check(&mut self) -> Result<(), StoreError> {
        match self.next_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.sequence += 1;
        format!("{}-{}", prefix, self.sequence)
    }

    fn taxa(&self, ids: &[String]) -> Vec<Taxon> {
        ids.iter().filter_map(|id| self.taxa.get(id).cloned()).collect()
    }

    fn summary(&self, item: &ItemRecord) -> ItemSummary {
        ItemSummary {
            id: item.id.clone(),
            created_at: Some(item.created_at.to_rfc3339()),
            name: item.name.clone(),
            slug: item.slug.clone(),
            description: Some(item.description.clone()),
            link: Some(item.link.clone()),
            featured: item.featured,
            icon: None,
            image: None,
            publish_date: item.publish_date.clone(),
            categories: self.taxa(&item.categories),
            tags: self.taxa(&item.tags),
        }
    }

    fn has_slug(&self, ids: &[String], slug: &str) -> bool {
        ids.iter()
            .filter_map(|id| self.taxa.get(id))
            .any(|t| t.slug == slug)
    }

    fn matches(&self, item: &ItemRecord, query: &ItemListQuery) -> bool {
        if !item.listed() {
            return false;
        }
        if let Some(term) = query.search.as_deref().filter(|s| !s.is_empty()) {
            let term = term.to_lowercase();
            let hit = item.name.to_lowercase().contains(&term)
                || item.description.to_lowercase().contains(&term)
                || item
                    .introduction
                    .as_deref()
                    .map_or(false, |i| i.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }
        if let Some(category) = &query.category {
            if !self.has_slug(&item.categories, category) {
                return false;
            }
        }
        if !query.tags.iter().all(|tag| self.has_slug(&item.tags, tag)) {
            return false;
        }
        let plan_ok = match query.filter {
            Some(ItemFilter::Featured) => item.featured,
            Some(ItemFilter::Free) => item.price_plan == PricePlan::Free,
            Some(ItemFilter::Paid) => item.price_plan.is_paid(),
            None => true,
        };
        if !plan_ok {
            return false;
        }
        let published = item.publish_date.as_deref().unwrap_or_default();
        if query.date_from.as_deref().map_or(false, |from| published < from) {
            return false;
        }
        if query.date_to.as_deref().map_or(false, |to| published > to) {
            return false;
        }
        true
    }
}

fn compare(sort: ItemSort, a: &ItemRecord, b: &ItemRecord) -> Ordering {
    match sort {
        ItemSort::Default => b
            .featured
            .cmp(&a.featured)
            .then_with(|| b.created_at.cmp(&a.created_at)),
        ItemSort::TimeAsc => a.created_at.cmp(&b.created_at),
        ItemSort::NameAsc => a.name.cmp(&b.name),
        ItemSort::NameDesc => b.name.cmp(&a.name),
    }
}

/// In-memory implementation of the content store ports.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemoryStore::new());
/// store.insert_taxon("cat-1", "Developer Tools", "dev-tools");
/// store.insert_item(ItemRecord::published("item-1", "Tool", "2024-01-01"));
/// ```
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the next store call with this error.
    pub fn fail_next(&self, error: StoreError) {
        self.state.lock().unwrap().next_error = Some(error);
    }

    pub fn insert_taxon(&self, id: &str, name: &str, slug: &str) {
        self.state.lock().unwrap().taxa.insert(
            id.to_string(),
            Taxon {
                id: id.to_string(),
                name: name.to_string(),
                slug: slug.to_string(),
            },
        );
    }

    pub fn insert_item(&self, item: ItemRecord) {
        self.state.lock().unwrap().items.push(item);
    }

    pub fn insert_user(&self, user: User) {
        self.state.lock().unwrap().users.push(user);
    }

    pub fn insert_subscriber(&self, subscriber: Subscriber) {
        self.state.lock().unwrap().subscribers.push(subscriber);
    }

    pub fn item(&self, id: &str) -> Option<ItemRecord> {
        self.state
            .lock()
            .unwrap()
            .items
            .iter()
            .find(|i| i.id == id)
            .cloned()
    }

    pub fn items(&self) -> Vec<ItemRecord> {
        self.state.lock().unwrap().items.clone()
    }

    pub fn users(&self) -> Vec<User> {
        self.state.lock().unwrap().users.clone()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.state.lock().unwrap().orders.clone()
    }

    pub fn subscribers(&self) -> Vec<Subscriber> {
        self.state.lock().unwrap().subscribers.clone()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.check()?;
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.check()?;
        let raw_id = state.next_id("user");
        let id = UserId::new(raw_id).map_err(|e| StoreError::Decode(e.to_string()))?;
        let created = User {
            id,
            name: Some(user.name),
            email: user.email,
            image: user.image,
            role: Some(user.role),
        };
        state.users.push(created.clone());
        Ok(created)
    }

    async fn set_image(&self, id: &UserId, image: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.check()?;
        let user = state
            .users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        user.image = Some(image.to_string());
        Ok(())
    }
}

#[async_trait]
impl ItemRepository for InMemoryStore {
    async fn create(&self, item: NewItem) -> Result<SubmittedItem, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.check()?;
        let raw_id = prefixed_document_id("item");
        let id = ItemId::new(raw_id.clone()).map_err(|e| StoreError::Decode(e.to_string()))?;
        let [(_, free), (_, pro), (_, sponsor)] = item.plan_statuses();
        state.items.push(ItemRecord {
            id: raw_id,
            name: item.name.clone(),
            slug: item.slug.clone(),
            link: item.link,
            description: item.description,
            introduction: item.introduction,
            price_plan: item.price_plan,
            categories: item.categories,
            tags: item.tags,
            submitter: Some(item.submitter),
            created_at: Timestamp::now(),
            publish_date: None,
            featured: false,
            sponsor: false,
            force_hidden: false,
            paid: false,
            order: None,
            free_plan_status: free,
            pro_plan_status: pro,
            sponsor_plan_status: sponsor,
        });
        Ok(SubmittedItem {
            id,
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
        let mut state = self.state.lock().unwrap();
        state.check()?;
        let item = state
            .items
            .iter_mut()
            .find(|i| i.id == id.as_str())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        item.paid = true;
        item.featured = true;
        item.price_plan = update.plan;
        item.sponsor = update.sponsor();
        item.pro_plan_status = Some(update.pro_plan_status());
        item.sponsor_plan_status = Some(update.sponsor_plan_status());
        item.order = Some(update.order.clone());
        Ok(())
    }

    async fn list(&self, query: &ItemListQuery) -> Result<ItemPage, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.check()?;
        let mut matching: Vec<&ItemRecord> = state
            .items
            .iter()
            .filter(|item| state.matches(item, query))
            .collect();
        matching.sort_by(|a, b| compare(query.sort, a, b));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit as usize)
            .map(|item| state.summary(item))
            .collect();
        Ok(ItemPage { items, total })
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ItemDetail>, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.check()?;
        let Some(item) = state
            .items
            .iter()
            .find(|i| i.slug == slug && !i.force_hidden)
        else {
            return Ok(None);
        };

        let mut related: Vec<&ItemRecord> = state
            .items
            .iter()
            .filter(|other| {
                other.id != item.id
                    && other.listed()
                    && other.categories.iter().any(|c| item.categories.contains(c))
            })
            .collect();
        related.sort_by(|a, b| {
            b.publish_date
                .cmp(&a.publish_date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });

        Ok(Some(ItemDetail {
            summary: state.summary(item),
            introduction: item.introduction.clone(),
            affiliate_link: None,
            related: related
                .into_iter()
                .take(RELATED_LIMIT)
                .map(|r| state.summary(r))
                .collect(),
        }))
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn create(&self, order: NewOrder) -> Result<Order, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.check()?;
        let raw_id = state.next_id("order");
        let id = OrderId::new(raw_id).map_err(|e| StoreError::Decode(e.to_string()))?;
        let created = Order::from_new(id, order);
        state.orders.push(created.clone());
        Ok(created)
    }

    async fn find_by_external_id(
        &self,
        external_order_id: &str,
    ) -> Result<Option<Order>, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.check()?;
        Ok(state
            .orders
            .iter()
            .find(|o| o.external_order_id == external_order_id)
            .cloned())
    }
}

#[async_trait]
impl SubscriberRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Subscriber>, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.check()?;
        Ok(state.subscribers.iter().find(|s| s.email == email).cloned())
    }

    async fn create(&self, subscriber: NewSubscriber) -> Result<Subscriber, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.check()?;
        let created = Subscriber {
            id: prefixed_document_id("subscriber"),
            email: subscriber.email,
            status: SubscriberStatus::Active,
        };
        state.subscribers.push(created.clone());
        Ok(created)
    }

    async fn reactivate(&self, id: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.check()?;
        let subscriber = state
            .subscribers
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        subscriber.status = SubscriberStatus::Active;
        Ok(())
    }
}
