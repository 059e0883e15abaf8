use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::connector::http::{ok, ApiResult, AppState};
use crate::domain::{PayrollRun, Salary};

#[derive(Debug, Deserialize)]
pub struct ProcessPayroll {
    pub branch_id: String,
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub month: u32,
    pub year: i32,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/payroll/process", post(process_payroll))
        .route("/branches/{id}/salaries", get(list_salaries))
        .route("/salaries/{id}/pay", post(pay_salary))
}

/// POST /api/payroll/process
async fn process_payroll(
    State(container): State<AppState>,
    payload: Result<Json<ProcessPayroll>, JsonRejection>,
) -> ApiResult<PayrollRun> {
    let Json(payload) = payload?;
    ok(container
        .process_salaries_use_case()
        .execute(&payload.branch_id, payload.month, payload.year)
        .await?)
}

/// GET /api/branches/{id}/salaries?month=&year=
async fn list_salaries(
    State(container): State<AppState>,
    Path(branch_id): Path<String>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> ApiResult<Vec<Salary>> {
    let Query(query) = query?;
    ok(container
        .process_salaries_use_case()
        .list(&branch_id, query.month, query.year)
        .await?)
}

/// POST /api/salaries/{id}/pay
async fn pay_salary(
    State(container): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Salary> {
    ok(container.process_salaries_use_case().pay(&id).await?)
}
