//! Item handlers.
//!
//! - SubmitItem: validate, store, optional Stripe checkout
//! - ListItems: paginated public listing
//! - GetItem: detail by slug

mod get_item;
mod list_items;
mod submit_item;

pub use get_item::{GetItemCommand, GetItemHandler};
pub use list_items::{ListItemsCommand, ListItemsHandler, ListItemsResult};
pub use submit_item::{
    SubmitItemCommand, SubmitItemHandler, SubmitItemResult, SUBMISSION_RECEIVED,
};
