use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use super::errors::DomainError;
use super::order::{CustomerView, NewOrderStatus, OrderStatusView, PagedResult, QueuedOrder};

/// Outcome of persisting a queued order against the unique order-number
/// constraint. `Duplicate` is the redelivery no-op path, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderInsert {
    Created(Uuid),
    Duplicate,
}

#[async_trait]
pub trait OrderStore: Send + Sync + 'static {
    /// Insert the order header and its line items in one transaction.
    async fn insert_order(&self, order: QueuedOrder) -> Result<OrderInsert, DomainError>;

    async fn create_status(&self, status: NewOrderStatus) -> Result<(), DomainError>;

    async fn find_status(&self, order_number: &str)
        -> Result<Option<OrderStatusView>, DomainError>;

    /// Update the status row by order number. Returns false when no row
    /// matches, which the caller must surface as a consistency gap.
    async fn set_status(&self, order_number: &str, status: &str) -> Result<bool, DomainError>;
}

#[async_trait]
pub trait CustomerStore: Send + Sync + 'static {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CustomerView>, DomainError>;

    /// 1-based page; the caller validates the parameters before reaching here.
    async fn list(
        &self,
        page_number: i64,
        page_size: i64,
    ) -> Result<PagedResult<CustomerView>, DomainError>;

    /// Cheap reachability probe for the health aggregator.
    async fn count(&self) -> Result<i64, DomainError>;
}

#[async_trait]
pub trait Cache: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError>;

    async fn ping(&self) -> Result<(), DomainError>;
}

#[async_trait]
pub trait MessagePublisher: Send + Sync + 'static {
    async fn publish(&self, topic: &str, key: &str, payload: &str) -> Result<(), DomainError>;

    /// Broker reachability probe (metadata peek, consumes nothing).
    async fn probe(&self) -> Result<(), DomainError>;
}
