use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::health::HealthReport;
use crate::errors::AppError;
use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub store_healthy: bool,
    pub cache_healthy: bool,
    pub queue_healthy: bool,
    pub overall_healthy: bool,
}

impl From<HealthReport> for HealthResponse {
    fn from(report: HealthReport) -> Self {
        HealthResponse {
            store_healthy: report.store_healthy,
            cache_healthy: report.cache_healthy,
            queue_healthy: report.queue_healthy,
            overall_healthy: report.overall_healthy,
        }
    }
}

/// GET /api/health
///
/// Probes store, cache, and queue reachability. Always 200; degraded
/// dependencies show up as false flags.
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Per-dependency health flags", body = HealthResponse),
    ),
    tag = "health"
)]
pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let report = state.health.check().await;
    Ok(HttpResponse::Ok().json(HealthResponse::from(report)))
}
