use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::order::CustomerView;
use crate::errors::AppError;
use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub company_name: Option<String>,
    pub email_address: Option<String>,
    pub phone: Option<String>,
    pub modified_date: DateTime<Utc>,
}

impl From<CustomerView> for CustomerResponse {
    fn from(view: CustomerView) -> Self {
        CustomerResponse {
            id: view.id,
            first_name: view.first_name,
            last_name: view.last_name,
            company_name: view.company_name,
            email_address: view.email_address,
            phone: view.phone,
            modified_date: view.modified_date,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetCustomerParams {
    /// Set to false to bypass the cache and read the store directly.
    #[serde(default = "default_use_cache")]
    pub use_cache: bool,
}

fn default_use_cache() -> bool {
    true
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListCustomersParams {
    /// Page number, 1-based. Required.
    pub page_number: i64,
    /// Items per page. Required.
    pub page_size: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedCustomersResponse {
    pub total_count: i64,
    pub page_number: i64,
    pub page_size: i64,
    pub items: Vec<CustomerResponse>,
}

/// GET /api/customers/{id}
#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    params(
        ("id" = Uuid, Path, description = "Customer UUID"),
        ("useCache" = Option<bool>, Query, description = "Bypass the cache when false (default true)"),
    ),
    responses(
        (status = 200, description = "Customer found", body = CustomerResponse),
        (status = 404, description = "Customer not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "customers"
)]
pub async fn get_customer(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<GetCustomerParams>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    match state.queries.customer_by_id(id, query.use_cache).await? {
        Some(customer) => Ok(HttpResponse::Ok().json(CustomerResponse::from(customer))),
        None => Err(AppError::NotFound),
    }
}

/// GET /api/customers
///
/// Paginated customer list. Both parameters are required; the page window and
/// the total count come back together so callers can compute page bounds.
#[utoipa::path(
    get,
    path = "/api/customers",
    params(
        ("pageNumber" = i64, Query, description = "Page number (1-based)"),
        ("pageSize" = i64, Query, description = "Items per page (1-100)"),
    ),
    responses(
        (status = 200, description = "One page of customers", body = PagedCustomersResponse),
        (status = 400, description = "Invalid pagination parameters"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "customers"
)]
pub async fn list_customers(
    state: web::Data<AppState>,
    query: web::Query<ListCustomersParams>,
) -> Result<HttpResponse, AppError> {
    let page = state
        .queries
        .list_customers(query.page_number, query.page_size)
        .await?;

    Ok(HttpResponse::Ok().json(PagedCustomersResponse {
        total_count: page.total_count,
        page_number: page.page_number,
        page_size: page.page_size,
        items: page.items.into_iter().map(CustomerResponse::from).collect(),
    }))
}
