use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{CustomerView, OrderStatusView, PagedResult};
use crate::domain::ports::{Cache, CustomerStore, OrderStore};

const MAX_PAGE_SIZE: i64 = 100;

/// Cache-aside reads over customers and order statuses. The cache is a strict
/// optimization: every cache failure degrades to a store read, and a store
/// miss is never cached.
pub struct QueryService<C, R, O> {
    cache: C,
    customers: R,
    orders: O,
    ttl: Duration,
}

impl<C: Cache, R: CustomerStore, O: OrderStore> QueryService<C, R, O> {
    pub fn new(cache: C, customers: R, orders: O, ttl: Duration) -> Self {
        Self {
            cache,
            customers,
            orders,
            ttl,
        }
    }

    pub async fn customer_by_id(
        &self,
        id: Uuid,
        use_cache: bool,
    ) -> Result<Option<CustomerView>, DomainError> {
        if !use_cache {
            return self.customers.find_by_id(id).await;
        }
        let key = format!("/api/customers/{id}");
        self.cache_aside(&key, || self.customers.find_by_id(id))
            .await
    }

    pub async fn list_customers(
        &self,
        page_number: i64,
        page_size: i64,
    ) -> Result<PagedResult<CustomerView>, DomainError> {
        if page_number < 1 {
            return Err(DomainError::InvalidInput(
                "pageNumber must be at least 1".to_string(),
            ));
        }
        if page_size < 1 || page_size > MAX_PAGE_SIZE {
            return Err(DomainError::InvalidInput(format!(
                "pageSize must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        let key = format!("/api/customers?pageNumber={page_number}&pageSize={page_size}");
        let page = self
            .cache_aside(&key, || async {
                self.customers.list(page_number, page_size).await.map(Some)
            })
            .await?;
        // The fetch closure always yields Some; an empty page is still a page.
        page.ok_or_else(|| DomainError::Internal("empty customer page projection".to_string()))
    }

    pub async fn order_status(
        &self,
        order_number: &str,
    ) -> Result<Option<OrderStatusView>, DomainError> {
        let key = format!("/api/orders/status/{order_number}");
        self.cache_aside(&key, || self.orders.find_status(order_number))
            .await
    }

    /// The shared cache-aside sequence: try the cache, fall back to the store,
    /// repopulate on a hit from the store. Cache errors and undecodable
    /// entries are logged and treated as misses; the populate step is
    /// best-effort.
    async fn cache_aside<T, F, Fut>(&self, key: &str, fetch: F) -> Result<Option<T>, DomainError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<T>, DomainError>>,
    {
        match self.cache.get(key).await {
            Ok(Some(raw)) if !raw.is_empty() => match serde_json::from_str(&raw) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => log::warn!("discarding undecodable cache entry {key}: {e}"),
            },
            Ok(_) => {}
            Err(e) => log::warn!("cache read failed for {key}: {e}"),
        }

        let fetched = fetch().await?;

        if let Some(value) = &fetched {
            match serde_json::to_string(value) {
                Ok(raw) => {
                    if let Err(e) = self.cache.set(key, &raw, self.ttl).await {
                        log::warn!("cache populate failed for {key}: {e}");
                    }
                }
                Err(e) => log::warn!("could not encode cache entry for {key}: {e}"),
            }
        }

        Ok(fetched)
    }
}
