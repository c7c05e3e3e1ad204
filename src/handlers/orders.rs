use std::str::FromStr;

use actix_web::http::header;
use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::order::{LineItemInput, OrderSubmission};
use crate::errors::AppError;
use crate::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLineItemRequest {
    pub product_id: Uuid,
    pub quantity: i32,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub price: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrderRequest {
    pub customer_id: Uuid,
    pub order_date: DateTime<Utc>,
    /// Free-form label copied onto the order at creation time.
    pub status: String,
    /// Ignored when supplied; intake always assigns its own.
    #[serde(default)]
    pub order_number: Option<String>,
    pub line_items: Vec<SubmitLineItemRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusResponse {
    pub order_number: String,
    pub customer_id: Uuid,
    pub status: String,
    pub date_modified: DateTime<Utc>,
}

fn parse_line(line: &SubmitLineItemRequest) -> Result<LineItemInput, AppError> {
    let price = BigDecimal::from_str(&line.price)
        .map_err(|e| AppError::Validation(format!("invalid price '{}': {}", line.price, e)))?;
    Ok(LineItemInput {
        product_id: line.product_id,
        quantity: line.quantity,
        price,
    })
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/orders
///
/// Records a `Received` status for the new order number and hands the order
/// to the fulfillment queue. Responds 202 with a `Location` header pointing
/// at the status resource; the order itself is persisted asynchronously.
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = SubmitOrderRequest,
    responses(
        (status = 202, description = "Order accepted; poll the Location header for status"),
        (status = 400, description = "Malformed submission"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn submit_order(
    state: web::Data<AppState>,
    body: web::Json<SubmitOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    if body.order_number.is_some() {
        log::debug!("ignoring caller-supplied order number");
    }

    let line_items = body
        .line_items
        .iter()
        .map(parse_line)
        .collect::<Result<Vec<_>, _>>()?;

    let order_number = state
        .intake
        .submit_order(OrderSubmission {
            customer_id: body.customer_id,
            order_date: body.order_date,
            status: body.status,
            line_items,
        })
        .await?;

    let location = state.config.status_location(&order_number);
    Ok(HttpResponse::Accepted()
        .insert_header((header::LOCATION, location))
        .finish())
}

/// GET /api/orders/status/{orderNumber}
///
/// Cache-aside read of the order's current lifecycle status.
#[utoipa::path(
    get,
    path = "/api/orders/status/{orderNumber}",
    params(
        ("orderNumber" = String, Path, description = "Order number assigned at submission"),
    ),
    responses(
        (status = 200, description = "Current status", body = OrderStatusResponse),
        (status = 404, description = "Unknown order number"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order_number = path.into_inner();

    match state.queries.order_status(&order_number).await? {
        Some(status) => Ok(HttpResponse::Ok().json(OrderStatusResponse {
            order_number: status.order_number,
            customer_id: status.customer_id,
            status: status.status,
            date_modified: status.date_modified,
        })),
        None => Err(AppError::NotFound),
    }
}
