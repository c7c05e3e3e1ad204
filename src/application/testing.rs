//! In-memory port implementations shared by the service unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{
    CustomerView, NewOrderStatus, OrderStatusView, PagedResult, QueuedOrder,
};
use crate::domain::ports::{Cache, CustomerStore, MessagePublisher, OrderInsert, OrderStore};

#[derive(Default)]
struct MemOrderState {
    orders: Vec<(Uuid, QueuedOrder)>,
    statuses: Vec<OrderStatusView>,
}

#[derive(Clone, Default)]
pub struct MemOrderStore {
    state: Arc<Mutex<MemOrderState>>,
    fail_status_writes: Arc<AtomicBool>,
}

impl MemOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_status_writes(&self, fail: bool) {
        self.fail_status_writes.store(fail, Ordering::SeqCst);
    }

    pub fn orders(&self) -> Vec<QueuedOrder> {
        self.state
            .lock()
            .unwrap()
            .orders
            .iter()
            .map(|(_, o)| o.clone())
            .collect()
    }

    pub fn statuses(&self) -> Vec<OrderStatusView> {
        self.state.lock().unwrap().statuses.clone()
    }
}

#[async_trait]
impl OrderStore for MemOrderStore {
    async fn insert_order(&self, order: QueuedOrder) -> Result<OrderInsert, DomainError> {
        let mut state = self.state.lock().unwrap();
        if state
            .orders
            .iter()
            .any(|(_, o)| o.order_number == order.order_number)
        {
            return Ok(OrderInsert::Duplicate);
        }
        let id = Uuid::new_v4();
        state.orders.push((id, order));
        Ok(OrderInsert::Created(id))
    }

    async fn create_status(&self, status: NewOrderStatus) -> Result<(), DomainError> {
        if self.fail_status_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Internal("status write refused".to_string()));
        }
        self.state.lock().unwrap().statuses.push(OrderStatusView {
            order_number: status.order_number,
            customer_id: status.customer_id,
            status: status.status,
            date_modified: status.date_modified,
        });
        Ok(())
    }

    async fn find_status(
        &self,
        order_number: &str,
    ) -> Result<Option<OrderStatusView>, DomainError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .statuses
            .iter()
            .find(|s| s.order_number == order_number)
            .cloned())
    }

    async fn set_status(&self, order_number: &str, status: &str) -> Result<bool, DomainError> {
        if self.fail_status_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Internal("status write refused".to_string()));
        }
        let mut state = self.state.lock().unwrap();
        match state
            .statuses
            .iter_mut()
            .find(|s| s.order_number == order_number)
        {
            Some(row) => {
                row.status = status.to_string();
                row.date_modified = chrono::Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Clone, Default)]
pub struct MemCustomerStore {
    customers: Arc<Mutex<Vec<CustomerView>>>,
    calls: Arc<AtomicUsize>,
    fail: Arc<AtomicBool>,
}

impl MemCustomerStore {
    pub fn with_customers(customers: Vec<CustomerView>) -> Self {
        Self {
            customers: Arc::new(Mutex::new(customers)),
            ..Self::default()
        }
    }

    /// Number of store reads observed, for asserting cache hits.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::Internal("store unreachable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CustomerStore for MemCustomerStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CustomerView>, DomainError> {
        self.check()?;
        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn list(
        &self,
        page_number: i64,
        page_size: i64,
    ) -> Result<PagedResult<CustomerView>, DomainError> {
        self.check()?;
        let customers = self.customers.lock().unwrap();
        let skip = ((page_number - 1) * page_size) as usize;
        let items = customers
            .iter()
            .skip(skip)
            .take(page_size as usize)
            .cloned()
            .collect();
        Ok(PagedResult {
            total_count: customers.len() as i64,
            page_number,
            page_size,
            items,
        })
    }

    async fn count(&self) -> Result<i64, DomainError> {
        self.check()?;
        Ok(self.customers.lock().unwrap().len() as i64)
    }
}

#[derive(Clone, Default)]
pub struct MemCache {
    entries: Arc<Mutex<std::collections::HashMap<String, String>>>,
    fail: Arc<AtomicBool>,
}

impl MemCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an unreachable cache; reads and writes both error.
    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn entry(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl Cache for MemCache {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::Internal("cache unreachable".to_string()));
        }
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str, _ttl: Duration) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::Internal("cache unreachable".to_string()));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::Internal("cache unreachable".to_string()));
        }
        Ok(())
    }
}

/// Records published messages; `statuses_at_publish` captures what the status
/// store looked like at publish time so tests can assert write ordering.
#[derive(Clone)]
pub struct RecordingPublisher {
    pub published: Arc<Mutex<Vec<(String, String, String)>>>,
    pub statuses_at_publish: Arc<Mutex<Vec<Vec<OrderStatusView>>>>,
    store: Option<MemOrderStore>,
    fail: Arc<AtomicBool>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self {
            published: Arc::new(Mutex::new(Vec::new())),
            statuses_at_publish: Arc::new(Mutex::new(Vec::new())),
            store: None,
            fail: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn observing(store: MemOrderStore) -> Self {
        Self {
            store: Some(store),
            ..Self::new()
        }
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn published(&self) -> Vec<(String, String, String)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessagePublisher for RecordingPublisher {
    async fn publish(&self, topic: &str, key: &str, payload: &str) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::Internal("broker unreachable".to_string()));
        }
        if let Some(store) = &self.store {
            self.statuses_at_publish.lock().unwrap().push(store.statuses());
        }
        self.published.lock().unwrap().push((
            topic.to_string(),
            key.to_string(),
            payload.to_string(),
        ));
        Ok(())
    }

    async fn probe(&self) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::Internal("broker unreachable".to_string()));
        }
        Ok(())
    }
}
