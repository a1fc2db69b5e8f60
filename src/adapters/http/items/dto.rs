//! Request and response bodies for item endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::items::{ListItemsCommand, ListItemsResult};
use crate::domain::catalog::{ItemSummary, SubmittedItem};

/// Listing query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItemsQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub sort: Option<String>,
    pub f: Option<String>,
    pub q: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl From<ListItemsQuery> for ListItemsCommand {
    fn from(query: ListItemsQuery) -> Self {
        Self {
            page: query.page,
            limit: query.limit,
            category: query.category,
            tag: query.tag,
            sort: query.sort,
            filter: query.f,
            q: query.q,
            date_from: query.date_from,
            date_to: query.date_to,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemListResponse {
    pub items: Vec<ItemSummary>,
    pub pagination: Pagination,
}

impl From<ListItemsResult> for ItemListResponse {
    fn from(result: ListItemsResult) -> Self {
        Self {
            items: result.items,
            pagination: Pagination {
                page: result.page,
                limit: result.limit,
                total: result.total,
                total_pages: result.total_pages,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitItemRequest {
    pub link: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub introduction: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub price_plan: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitItemResponse {
    pub success: bool,
    pub item: SubmittedItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
