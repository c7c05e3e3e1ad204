use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrderStatus, OrderSubmission, STATUS_FAILED, STATUS_RECEIVED};
use crate::domain::ports::{MessagePublisher, OrderStore};

/// Accepts order submissions: records a `Received` status, hands the order to
/// the queue, and returns the assigned order number.
pub struct IntakeService<S, P> {
    store: S,
    publisher: P,
    topic: String,
}

impl<S: OrderStore, P: MessagePublisher> IntakeService<S, P> {
    pub fn new(store: S, publisher: P, topic: String) -> Self {
        Self {
            store,
            publisher,
            topic,
        }
    }

    /// Submit an order. The status write completes before the publish; that
    /// row is the durability guarantee behind the 202 response.
    ///
    /// The status write and the publish are two independent operations, not
    /// one transaction. When the publish fails the status row is marked
    /// `Failed` as a compensating step so it never sits in `Received` with no
    /// message behind it.
    pub async fn submit_order(&self, submission: OrderSubmission) -> Result<String, DomainError> {
        validate(&submission)?;

        // Assigned here, before any persistence; caller-supplied numbers were
        // already discarded when the request was decoded.
        let order_number = Uuid::new_v4().to_string();

        self.store
            .create_status(NewOrderStatus {
                order_number: order_number.clone(),
                customer_id: submission.customer_id,
                status: STATUS_RECEIVED.to_string(),
                date_modified: Utc::now(),
            })
            .await?;

        let queued = submission.into_queued(order_number.clone());
        let payload = serde_json::to_string(&queued)
            .map_err(|e| DomainError::Internal(format!("failed to encode order message: {e}")))?;

        if let Err(e) = self
            .publisher
            .publish(&self.topic, &order_number, &payload)
            .await
        {
            log::error!("publish failed for order {order_number}: {e}");
            if let Err(comp) = self.store.set_status(&order_number, STATUS_FAILED).await {
                log::error!("could not mark order {order_number} as Failed: {comp}");
            }
            return Err(e);
        }

        Ok(order_number)
    }
}

fn validate(submission: &OrderSubmission) -> Result<(), DomainError> {
    let zero = BigDecimal::from(0);
    for (idx, line) in submission.line_items.iter().enumerate() {
        if line.quantity <= 0 {
            return Err(DomainError::InvalidInput(format!(
                "line item {idx}: quantity must be positive"
            )));
        }
        if line.price < zero {
            return Err(DomainError::InvalidInput(format!(
                "line item {idx}: price must not be negative"
            )));
        }
    }
    Ok(())
}
