use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status written by intake when the submission is durably recorded.
pub const STATUS_RECEIVED: &str = "Received";
/// Status written by the fulfillment worker after the order is persisted.
pub const STATUS_ACCEPTED: &str = "Accepted";
/// Compensating marker written by intake when the queue publish fails after
/// the status row already exists.
pub const STATUS_FAILED: &str = "Failed";

#[derive(Debug, Clone)]
pub struct LineItemInput {
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: BigDecimal,
}

/// A validated order submission, before an order number is assigned.
#[derive(Debug, Clone)]
pub struct OrderSubmission {
    pub customer_id: Uuid,
    pub order_date: DateTime<Utc>,
    /// Free-form label copied onto the order row at creation time. Distinct
    /// from the status lifecycle tracked in `order_statuses`.
    pub status: String,
    pub line_items: Vec<LineItemInput>,
}

/// The queue message contract: the submission shape plus the order number
/// assigned by intake. Serialized as camelCase JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedOrder {
    pub order_number: String,
    pub customer_id: Uuid,
    pub order_date: DateTime<Utc>,
    pub status: String,
    pub line_items: Vec<QueuedLineItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedLineItem {
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: BigDecimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderStatusView {
    pub order_number: String,
    pub customer_id: Uuid,
    pub status: String,
    pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOrderStatus {
    pub order_number: String,
    pub customer_id: Uuid,
    pub status: String,
    pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerView {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub company_name: Option<String>,
    pub email_address: Option<String>,
    pub phone: Option<String>,
    pub modified_date: DateTime<Utc>,
}

/// One page of a store query plus the total unpaginated count, so callers can
/// compute page bounds. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PagedResult<T> {
    pub total_count: i64,
    pub page_number: i64,
    pub page_size: i64,
    pub items: Vec<T>,
}

impl OrderSubmission {
    pub fn into_queued(self, order_number: String) -> QueuedOrder {
        QueuedOrder {
            order_number,
            customer_id: self.customer_id,
            order_date: self.order_date,
            status: self.status,
            line_items: self
                .line_items
                .into_iter()
                .map(|li| QueuedLineItem {
                    product_id: li.product_id,
                    quantity: li.quantity,
                    price: li.price,
                })
                .collect(),
        }
    }
}
