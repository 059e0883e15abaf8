use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::application::NewVehicle;
use crate::connector::http::{created, ok, ApiResult, AppState, Created};
use crate::domain::Vehicle;

#[derive(Debug, Deserialize)]
pub struct UpdateOdometer {
    pub current_km: i64,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/vehicles", post(create_vehicle))
        .route("/branches/{id}/vehicles", get(list_vehicles))
        .route("/vehicles/{id}", get(get_vehicle).delete(delete_vehicle))
        .route("/vehicles/{id}/odometer", put(update_odometer))
}

/// POST /api/vehicles
async fn create_vehicle(
    State(container): State<AppState>,
    payload: Result<Json<NewVehicle>, JsonRejection>,
) -> Created<Vehicle> {
    let Json(payload) = payload?;
    created(container.vehicles_use_case().create(payload).await?)
}

/// GET /api/branches/{id}/vehicles
async fn list_vehicles(
    State(container): State<AppState>,
    Path(branch_id): Path<String>,
) -> ApiResult<Vec<Vehicle>> {
    ok(container.vehicles_use_case().list(&branch_id).await?)
}

/// GET /api/vehicles/{id}
async fn get_vehicle(
    State(container): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vehicle> {
    ok(container.vehicles_use_case().get(&id).await?)
}

/// PUT /api/vehicles/{id}/odometer
async fn update_odometer(
    State(container): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateOdometer>, JsonRejection>,
) -> ApiResult<Vehicle> {
    let Json(payload) = payload?;
    ok(container
        .vehicles_use_case()
        .update_odometer(&id, payload.current_km)
        .await?)
}

/// DELETE /api/vehicles/{id}
async fn delete_vehicle(
    State(container): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    container.vehicles_use_case().delete(&id).await?;
    ok(json!({ "id": id, "deleted": true }))
}
