use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::application::NewVacation;
use crate::connector::http::{created, ok, ApiResult, AppState, Created};
use crate::domain::Vacation;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/vacations", post(request_vacation))
        .route("/employees/{id}/vacations", get(list_vacations))
        .route("/vacations/{id}/cancel", post(cancel_vacation))
}

/// POST /api/vacations
async fn request_vacation(
    State(container): State<AppState>,
    payload: Result<Json<NewVacation>, JsonRejection>,
) -> Created<Vacation> {
    let Json(payload) = payload?;
    created(container.vacations_use_case().request(payload).await?)
}

/// GET /api/employees/{id}/vacations
async fn list_vacations(
    State(container): State<AppState>,
    Path(employee_id): Path<String>,
) -> ApiResult<Vec<Vacation>> {
    ok(container.vacations_use_case().list(&employee_id).await?)
}

/// POST /api/vacations/{id}/cancel
async fn cancel_vacation(
    State(container): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vacation> {
    ok(container.vacations_use_case().cancel(&id).await?)
}
