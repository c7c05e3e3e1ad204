use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{QueuedOrder, STATUS_ACCEPTED};
use crate::domain::ports::{OrderInsert, OrderStore};

/// What happened to one queue message. Everything except a hard error is
/// acknowledged by the receive loop.
#[derive(Debug, PartialEq)]
pub enum ProcessOutcome {
    Completed { order_id: Uuid },
    /// The order number already exists in the store; a redelivered message.
    AlreadyProcessed,
    /// The order was persisted but no status row matched its order number.
    /// The intake write that should have created it is missing.
    StatusMissing { order_id: Uuid },
}

/// Process one order message: persist the aggregate, then advance the status
/// row to `Accepted` by order number.
///
/// Runs under at-least-once delivery. A redelivered message hits the unique
/// order-number constraint and takes the duplicate path, which still advances
/// the status so the transition stays idempotent.
pub async fn process_order_message<S: OrderStore>(
    store: &S,
    body: &str,
) -> Result<ProcessOutcome, DomainError> {
    let order: QueuedOrder = serde_json::from_str(body)
        .map_err(|e| DomainError::InvalidInput(format!("malformed order message: {e}")))?;
    let order_number = order.order_number.clone();

    let inserted = store.insert_order(order).await?;
    let status_advanced = store.set_status(&order_number, STATUS_ACCEPTED).await?;

    match inserted {
        OrderInsert::Duplicate => {
            log::info!("order {order_number} already persisted; treating redelivery as no-op");
            Ok(ProcessOutcome::AlreadyProcessed)
        }
        OrderInsert::Created(order_id) if status_advanced => {
            Ok(ProcessOutcome::Completed { order_id })
        }
        OrderInsert::Created(order_id) => Ok(ProcessOutcome::StatusMissing { order_id }),
    }
}
