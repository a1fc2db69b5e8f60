//! ListItemsHandler - paginated, filtered listing of published items.

use std::sync::Arc;

use crate::domain::catalog::{
    CatalogError, ItemFilter, ItemListQuery, ItemSort, ItemSummary, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
};
use crate::ports::ItemRepository;

/// Query string parameters, unparsed.
#[derive(Debug, Clone, Default)]
pub struct ListItemsCommand {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
    /// Comma-separated tag slugs.
    pub tag: Option<String>,
    pub sort: Option<String>,
    pub filter: Option<String>,
    pub q: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListItemsResult {
    pub items: Vec<ItemSummary>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn positive(value: Option<&str>) -> Option<u32> {
    value.and_then(|v| v.trim().parse::<u32>().ok()).filter(|n| *n > 0)
}

fn split_tags(value: Option<&str>) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in value.unwrap_or_default().split(',').map(str::trim) {
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

impl ListItemsCommand {
    pub fn into_query(self) -> ItemListQuery {
        ItemListQuery {
            page: positive(self.page.as_deref()).unwrap_or(1),
            limit: positive(self.limit.as_deref())
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .min(MAX_PAGE_SIZE),
            tags: split_tags(self.tag.as_deref()),
            sort: ItemSort::parse(self.sort.as_deref()),
            filter: self.filter.as_deref().and_then(ItemFilter::parse),
            search: present(self.q),
            category: present(self.category),
            date_from: present(self.date_from),
            date_to: present(self.date_to),
        }
    }
}

pub struct ListItemsHandler {
    items: Arc<dyn ItemRepository>,
}

impl ListItemsHandler {
    pub fn new(items: Arc<dyn ItemRepository>) -> Self {
        Self { items }
    }

    pub async fn handle(&self, cmd: ListItemsCommand) -> Result<ListItemsResult, CatalogError> {
        let query = cmd.into_query();
        let page = self.items.list(&query).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to list items");
            CatalogError::Storage(e.to_string())
        })?;

        Ok(ListItemsResult {
            items: page.items,
            page: query.page,
            limit: query.limit,
            total: page.total,
            total_pages: page.total.div_ceil(u64::from(query.limit)),
        })
    }
}
