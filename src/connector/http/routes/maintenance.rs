use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::application::NewMaintenanceLabel;
use crate::connector::http::{created, ok, ApiResult, AppState, Created};
use crate::domain::{MaintenanceDueReport, MaintenanceLabel};

#[derive(Debug, Deserialize)]
pub struct DueQuery {
    pub reference_km: Option<i64>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/maintenance-labels", post(create_label))
        .route("/vehicles/{id}/maintenance-labels", get(list_labels))
        .route("/vehicles/{id}/maintenance-due", get(vehicle_due))
        .route("/branches/{id}/maintenance-due", get(branch_due))
}

/// POST /api/maintenance-labels
async fn create_label(
    State(container): State<AppState>,
    payload: Result<Json<NewMaintenanceLabel>, JsonRejection>,
) -> Created<MaintenanceLabel> {
    let Json(payload) = payload?;
    created(
        container
            .create_maintenance_label_use_case()
            .execute(payload)
            .await?,
    )
}

/// GET /api/vehicles/{id}/maintenance-labels
async fn list_labels(
    State(container): State<AppState>,
    Path(vehicle_id): Path<String>,
) -> ApiResult<Vec<MaintenanceLabel>> {
    ok(container
        .create_maintenance_label_use_case()
        .list_by_vehicle(&vehicle_id)
        .await?)
}

/// GET /api/vehicles/{id}/maintenance-due?reference_km=
async fn vehicle_due(
    State(container): State<AppState>,
    Path(vehicle_id): Path<String>,
    query: Result<Query<DueQuery>, QueryRejection>,
) -> ApiResult<MaintenanceDueReport> {
    let Query(query) = query?;
    ok(container
        .maintenance_due_use_case()
        .by_vehicle(&vehicle_id, query.reference_km)
        .await?)
}

/// GET /api/branches/{id}/maintenance-due
async fn branch_due(
    State(container): State<AppState>,
    Path(branch_id): Path<String>,
) -> ApiResult<Vec<MaintenanceDueReport>> {
    ok(container
        .maintenance_due_use_case()
        .by_branch(&branch_id)
        .await?)
}
