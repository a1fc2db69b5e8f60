//! Directory items: submission, payment reconciliation and listing views.

use serde::{Deserialize, Serialize};

use super::plan::{PlanStatus, PricePlan};
use crate::domain::foundation::{ItemId, OrderId, UserId};

/// Derives a URL slug: lowercase, runs of non-alphanumerics collapsed to `-`,
/// no leading or trailing dash.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// A validated submission, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub slug: String,
    pub link: String,
    pub description: String,
    pub introduction: Option<String>,
    pub price_plan: PricePlan,
    /// Category document ids
    pub categories: Vec<String>,
    /// Tag document ids
    pub tags: Vec<String>,
    /// Asset id of the uploaded icon
    pub icon_asset: Option<String>,
    /// Asset id of the uploaded image
    pub image_asset: Option<String>,
    pub submitter: UserId,
}

impl NewItem {
    /// Status fields to initialize: the chosen plan starts as `submitting`.
    pub fn plan_statuses(&self) -> [(&'static str, Option<PlanStatus>); 3] {
        let status = |plan| (self.price_plan == plan).then_some(PlanStatus::Submitting);
        [
            ("freePlanStatus", status(PricePlan::Free)),
            ("proPlanStatus", status(PricePlan::Pro)),
            ("sponsorPlanStatus", status(PricePlan::Sponsor)),
        ]
    }
}

/// What the store returns after a submission is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedItem {
    #[serde(rename = "_id")]
    pub id: ItemId,
    pub name: String,
    pub slug: String,
    pub price_plan: PricePlan,
}

/// Item fields set once a checkout for it completes.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPaymentUpdate {
    pub plan: PricePlan,
    pub order: OrderId,
}

impl ItemPaymentUpdate {
    pub fn new(plan: PricePlan, order: OrderId) -> Self {
        Self { plan, order }
    }

    pub fn sponsor(&self) -> bool {
        self.plan == PricePlan::Sponsor
    }

    /// The purchased plan becomes `success`; the other paid plan stays `submitting`.
    pub fn pro_plan_status(&self) -> PlanStatus {
        if self.plan == PricePlan::Pro {
            PlanStatus::Success
        } else {
            PlanStatus::Submitting
        }
    }

    pub fn sponsor_plan_status(&self) -> PlanStatus {
        if self.sponsor() {
            PlanStatus::Success
        } else {
            PlanStatus::Submitting
        }
    }
}

/// Category or tag as shown next to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxon {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// Card view of a published item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_createdAt", default)]
    pub created_at: Option<String>,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub icon: Option<serde_json::Value>,
    #[serde(default)]
    pub image: Option<serde_json::Value>,
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub categories: Vec<Taxon>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<Taxon>,
}

/// Full view of one item, with a few related items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetail {
    #[serde(flatten)]
    pub summary: ItemSummary,
    #[serde(default)]
    pub introduction: Option<String>,
    #[serde(default)]
    pub affiliate_link: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub related: Vec<ItemSummary>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Shortcut filters offered by the listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemFilter {
    Featured,
    Free,
    Paid,
}

impl ItemFilter {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "featured" => Some(ItemFilter::Featured),
            "free" => Some(ItemFilter::Free),
            "paid" => Some(ItemFilter::Paid),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemSort {
    /// Featured first, then newest.
    #[default]
    Default,
    TimeAsc,
    NameAsc,
    NameDesc,
}

impl ItemSort {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("time-asc") => ItemSort::TimeAsc,
            Some("name-asc") => ItemSort::NameAsc,
            Some("name-desc") => ItemSort::NameDesc,
            _ => ItemSort::Default,
        }
    }
}

pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Listing query over published, visible, non-sponsor items.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemListQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub category: Option<String>,
    /// Every tag must be present on the item.
    pub tags: Vec<String>,
    pub filter: Option<ItemFilter>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub sort: ItemSort,
}

impl ItemListQuery {
    /// Zero-based index of the first item on the page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

impl Default for ItemListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: None,
            category: None,
            tags: Vec::new(),
            filter: None,
            date_from: None,
            date_to: None,
            sort: ItemSort::Default,
        }
    }
}

/// One page of results plus the unpaginated total.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPage {
    pub items: Vec<ItemSummary>,
    pub total: u64,
}
