use rdkafka::config::ClientConfig;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::Message;

use crate::application::fulfillment::{process_order_message, ProcessOutcome};
use crate::domain::errors::DomainError;
use crate::domain::ports::{MessagePublisher, OrderStore};

/// The long-lived receive loop: one queued order message at a time, offset
/// committed only after the store writes succeed.
pub struct FulfillmentConsumer<S, P> {
    consumer: StreamConsumer,
    store: S,
    dead_letters: P,
    dead_letter_topic: String,
}

impl<S: OrderStore, P: MessagePublisher> FulfillmentConsumer<S, P> {
    pub fn new(
        brokers: &str,
        group: &str,
        topic: &str,
        store: S,
        dead_letters: P,
        dead_letter_topic: String,
    ) -> Result<Self, DomainError> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("group.id", group)
            // Offsets are committed manually, after persistence. A crash
            // between the store write and the commit redelivers the message;
            // the duplicate path in the store absorbs the replay.
            .set("enable.auto.commit", "false")
            .set("auto.offset.reset", "earliest")
            .create()
            .map_err(|e| DomainError::Internal(format!("failed to create consumer: {e}")))?;
        consumer
            .subscribe(&[topic])
            .map_err(|e| DomainError::Internal(format!("failed to subscribe to {topic}: {e}")))?;

        Ok(Self {
            consumer,
            store,
            dead_letters,
            dead_letter_topic,
        })
    }

    /// Run forever. Dependency failures are logged and the message is left
    /// uncommitted for redelivery; the loop itself never stops.
    pub async fn run(&self) {
        loop {
            let message = match self.consumer.recv().await {
                Ok(m) => m,
                Err(e) => {
                    log::error!("queue receive failed: {e}");
                    continue;
                }
            };

            let key = message
                .key()
                .and_then(|k| std::str::from_utf8(k).ok())
                .unwrap_or("<none>");
            let body = match message.payload().map(std::str::from_utf8) {
                Some(Ok(body)) => body,
                _ => {
                    log::error!("non-utf8 order message (key {key}); dead-lettering");
                    self.dead_letter(key, "").await;
                    self.commit(&message);
                    continue;
                }
            };

            match process_order_message(&self.store, body).await {
                Ok(ProcessOutcome::Completed { order_id }) => {
                    log::info!("order {key} persisted as {order_id}");
                    self.commit(&message);
                }
                Ok(ProcessOutcome::AlreadyProcessed) => {
                    log::info!("order {key} redelivered; already persisted");
                    self.commit(&message);
                }
                Ok(ProcessOutcome::StatusMissing { order_id }) => {
                    // Reportable inconsistency: intake's status write is
                    // missing. The order itself is persisted, so the message
                    // is still acknowledged.
                    log::error!("order {key} persisted as {order_id} but no status row matched");
                    self.commit(&message);
                }
                Err(DomainError::InvalidInput(e)) => {
                    log::error!("rejecting malformed order message (key {key}): {e}");
                    self.dead_letter(key, body).await;
                    self.commit(&message);
                }
                Err(e) => {
                    log::error!("processing failed for order {key}, leaving for redelivery: {e}");
                }
            }
        }
    }

    async fn dead_letter(&self, key: &str, body: &str) {
        if let Err(e) = self
            .dead_letters
            .publish(&self.dead_letter_topic, key, body)
            .await
        {
            log::error!("dead-letter publish failed for {key}: {e}");
        }
    }

    fn commit(&self, message: &rdkafka::message::BorrowedMessage<'_>) {
        if let Err(e) = self.consumer.commit_message(message, CommitMode::Async) {
            log::error!("offset commit failed: {e}");
        }
    }
}
