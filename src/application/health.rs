use serde::Serialize;

use crate::domain::ports::{Cache, CustomerStore, MessagePublisher};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub store_healthy: bool,
    pub cache_healthy: bool,
    pub queue_healthy: bool,
    pub overall_healthy: bool,
}

/// Probes each dependency independently. A failing probe surfaces only as
/// `false` in its own field; it never aborts the other probes.
pub struct HealthService<R, C, Q> {
    customers: R,
    cache: C,
    queue: Q,
}

impl<R: CustomerStore, C: Cache, Q: MessagePublisher> HealthService<R, C, Q> {
    pub fn new(customers: R, cache: C, queue: Q) -> Self {
        Self {
            customers,
            cache,
            queue,
        }
    }

    pub async fn check(&self) -> HealthReport {
        let store_healthy = match self.customers.count().await {
            Ok(_) => true,
            Err(e) => {
                log::warn!("store health probe failed: {e}");
                false
            }
        };

        let cache_healthy = match self.cache.ping().await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("cache health probe failed: {e}");
                false
            }
        };

        let queue_healthy = match self.queue.probe().await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("queue health probe failed: {e}");
                false
            }
        };

        HealthReport {
            store_healthy,
            cache_healthy,
            queue_healthy,
            overall_healthy: store_healthy && cache_healthy && queue_healthy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{MemCache, MemCustomerStore, RecordingPublisher};

    fn service(
        customers: MemCustomerStore,
        cache: MemCache,
        queue: RecordingPublisher,
    ) -> HealthService<MemCustomerStore, MemCache, RecordingPublisher> {
        HealthService::new(customers, cache, queue)
    }

    #[tokio::test]
    async fn all_dependencies_healthy() {
        let svc = service(
            MemCustomerStore::default(),
            MemCache::new(),
            RecordingPublisher::new(),
        );

        let report = svc.check().await;

        assert_eq!(
            report,
            HealthReport {
                store_healthy: true,
                cache_healthy: true,
                queue_healthy: true,
                overall_healthy: true,
            }
        );
    }

    #[tokio::test]
    async fn cache_failure_is_isolated() {
        let cache = MemCache::new();
        cache.fail(true);
        let svc = service(MemCustomerStore::default(), cache, RecordingPublisher::new());

        let report = svc.check().await;

        assert!(report.store_healthy);
        assert!(!report.cache_healthy);
        assert!(report.queue_healthy);
        assert!(!report.overall_healthy);
    }

    #[tokio::test]
    async fn store_failure_is_isolated() {
        let customers = MemCustomerStore::default();
        customers.fail_reads(true);
        let svc = service(customers, MemCache::new(), RecordingPublisher::new());

        let report = svc.check().await;

        assert!(!report.store_healthy);
        assert!(report.cache_healthy);
        assert!(report.queue_healthy);
        assert!(!report.overall_healthy);
    }

    #[tokio::test]
    async fn queue_failure_is_isolated() {
        let queue = RecordingPublisher::new();
        queue.fail(true);
        let svc = service(MemCustomerStore::default(), MemCache::new(), queue);

        let report = svc.check().await;

        assert!(report.store_healthy);
        assert!(report.cache_healthy);
        assert!(!report.queue_healthy);
        assert!(!report.overall_healthy);
    }

    #[test]
    fn report_serializes_camel_case() {
        let report = HealthReport {
            store_healthy: true,
            cache_healthy: false,
            queue_healthy: true,
            overall_healthy: false,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["storeHealthy"], true);
        assert_eq!(json["cacheHealthy"], false);
        assert_eq!(json["overallHealthy"], false);
    }
}
