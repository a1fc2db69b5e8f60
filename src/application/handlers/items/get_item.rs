//! GetItemHandler - one visible item by slug.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, ItemDetail};
use crate::ports::ItemRepository;

#[derive(Debug, Clone)]
pub struct GetItemCommand {
    pub slug: String,
}

pub struct GetItemHandler {
    items: Arc<dyn ItemRepository>,
}

impl GetItemHandler {
    pub fn new(items: Arc<dyn ItemRepository>) -> Self {
        Self { items }
    }

    pub async fn handle(&self, cmd: GetItemCommand) -> Result<ItemDetail, CatalogError> {
        self.items
            .find_by_slug(&cmd.slug)
            .await
            .map_err(|e| {
                tracing::error!(slug = %cmd.slug, error = %e, "Failed to load item");
                CatalogError::Storage(e.to_string())
            })?
            .ok_or(CatalogError::ItemNotFound(cmd.slug))
    }
}
