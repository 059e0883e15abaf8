mod branches;
mod employees;
mod finance;
mod maintenance;
mod payroll;
mod vacations;
mod vehicles;

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};

use super::{ok, ApiResult, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(branches::router())
        .merge(employees::router())
        .merge(vehicles::router())
        .merge(maintenance::router())
        .merge(payroll::router())
        .merge(vacations::router())
        .merge(finance::router())
}

/// GET /api/health
async fn health(State(container): State<AppState>) -> ApiResult<Value> {
    let storage = if container.memory_storage() {
        "memory"
    } else {
        "duckdb"
    };
    ok(json!({ "status": "ok", "storage": storage }))
}
