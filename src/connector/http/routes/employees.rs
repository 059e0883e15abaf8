use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::application::NewEmployee;
use crate::connector::http::{created, ok, ApiResult, AppState, Created};
use crate::domain::Employee;

#[derive(Debug, Deserialize)]
pub struct EmployeeListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSalary {
    /// `null` clears the salary.
    pub monthly_salary: Option<Decimal>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/employees", post(create_employee))
        .route("/branches/{id}/employees", get(list_employees))
        .route("/employees/{id}/salary", put(update_salary))
        .route("/employees/{id}/deactivate", post(deactivate_employee))
        .route("/employees/{id}", delete(delete_employee))
}

/// POST /api/employees
async fn create_employee(
    State(container): State<AppState>,
    payload: Result<Json<NewEmployee>, JsonRejection>,
) -> Created<Employee> {
    let Json(payload) = payload?;
    created(container.employees_use_case().create(payload).await?)
}

/// GET /api/branches/{id}/employees?include_inactive=
async fn list_employees(
    State(container): State<AppState>,
    Path(branch_id): Path<String>,
    query: Result<Query<EmployeeListQuery>, QueryRejection>,
) -> ApiResult<Vec<Employee>> {
    let Query(query) = query?;
    ok(container
        .employees_use_case()
        .list(&branch_id, query.include_inactive)
        .await?)
}

/// PUT /api/employees/{id}/salary
async fn update_salary(
    State(container): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateSalary>, JsonRejection>,
) -> ApiResult<Employee> {
    let Json(payload) = payload?;
    ok(container
        .employees_use_case()
        .set_monthly_salary(&id, payload.monthly_salary)
        .await?)
}

/// POST /api/employees/{id}/deactivate
async fn deactivate_employee(
    State(container): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Employee> {
    ok(container.employees_use_case().deactivate(&id).await?)
}

/// DELETE /api/employees/{id}
///
/// Soft delete: the employee stays referenced by past salaries.
async fn delete_employee(
    State(container): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    container.employees_use_case().delete(&id).await?;
    ok(json!({ "id": id, "deleted": true }))
}
