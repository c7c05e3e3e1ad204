use std::time::Duration;

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::message::{Header, OwnedHeaders};
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;

use crate::domain::errors::DomainError;
use crate::domain::ports::MessagePublisher;

const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Kafka producer adapter. Messages carry a `content-type` header so
/// downstream consumers can assert the JSON contract.
#[derive(Clone)]
pub struct KafkaPublisher {
    producer: FutureProducer,
    /// Topic used by `probe` for the health metadata peek.
    probe_topic: String,
}

impl KafkaPublisher {
    pub fn new(brokers: &str, probe_topic: &str) -> Result<Self, DomainError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "5000")
            .create()
            .map_err(|e| DomainError::Internal(format!("failed to create producer: {e}")))?;
        Ok(Self {
            producer,
            probe_topic: probe_topic.to_string(),
        })
    }
}

#[async_trait]
impl MessagePublisher for KafkaPublisher {
    async fn publish(&self, topic: &str, key: &str, payload: &str) -> Result<(), DomainError> {
        let record = FutureRecord::to(topic)
            .key(key)
            .payload(payload)
            .headers(OwnedHeaders::new().insert(Header {
                key: "content-type",
                value: Some("application/json"),
            }));

        self.producer
            .send(record, Timeout::After(SEND_TIMEOUT))
            .await
            .map_err(|(e, _)| DomainError::Internal(format!("kafka send failed: {e}")))?;

        log::debug!("published order message to {topic} (key {key})");
        Ok(())
    }

    async fn probe(&self) -> Result<(), DomainError> {
        // fetch_metadata blocks, so it runs on the blocking pool like the
        // diesel adapters do.
        let producer = self.producer.clone();
        let topic = self.probe_topic.clone();
        tokio::task::spawn_blocking(move || {
            producer
                .client()
                .fetch_metadata(Some(&topic), SEND_TIMEOUT)
                .map_err(|e| DomainError::Internal(format!("kafka metadata fetch failed: {e}")))?;
            Ok(())
        })
        .await
        .map_err(|e| DomainError::Internal(format!("blocking task failed: {e}")))?
    }
}
