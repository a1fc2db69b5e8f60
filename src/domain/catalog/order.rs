//! Orders record completed payments for an item. Append-only.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ItemId, OrderId, Timestamp, UserId};
use crate::domain::payment::PaymentProviderKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Success,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Success => "success",
        }
    }
}

/// Order about to be recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user: UserId,
    pub item: ItemId,
    pub status: OrderStatus,
    pub provider: PaymentProviderKind,
    /// Provider-side order id; used to recognise redelivered events.
    pub external_order_id: String,
    pub date: Timestamp,
}

/// A recorded order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub user: UserId,
    pub item: ItemId,
    pub status: OrderStatus,
    pub provider: PaymentProviderKind,
    pub external_order_id: String,
    pub date: Timestamp,
}

impl Order {
    pub fn from_new(id: OrderId, new: NewOrder) -> Self {
        Self {
            id,
            user: new.user,
            item: new.item,
            status: new.status,
            provider: new.provider,
            external_order_id: new.external_order_id,
            date: new.date,
        }
    }
}
