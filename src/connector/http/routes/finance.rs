use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::application::{NewPayable, NewReceivable};
use crate::connector::http::{created, ok, ApiResult, AppState, Created};
use crate::domain::{AccountPayable, AccountReceivable, PayableStatus};

#[derive(Debug, Deserialize)]
pub struct PayableQuery {
    pub status: Option<PayableStatus>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/accounts-payable", post(create_payable))
        .route("/branches/{id}/accounts-payable", get(list_payables))
        .route("/accounts-payable/{id}/pay", post(pay_payable))
        .route("/accounts-receivable", post(create_receivable))
        .route("/branches/{id}/accounts-receivable", get(list_receivables))
        .route("/accounts-receivable/{id}/receive", post(receive_receivable))
}

/// POST /api/accounts-payable
async fn create_payable(
    State(container): State<AppState>,
    payload: Result<Json<NewPayable>, JsonRejection>,
) -> Created<AccountPayable> {
    let Json(payload) = payload?;
    created(container.payables_use_case().create(payload).await?)
}

/// GET /api/branches/{id}/accounts-payable?status=
async fn list_payables(
    State(container): State<AppState>,
    Path(branch_id): Path<String>,
    query: Result<Query<PayableQuery>, QueryRejection>,
) -> ApiResult<Vec<AccountPayable>> {
    let Query(query) = query?;
    ok(container
        .payables_use_case()
        .list(&branch_id, query.status)
        .await?)
}

/// POST /api/accounts-payable/{id}/pay
async fn pay_payable(
    State(container): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<AccountPayable> {
    ok(container.payables_use_case().pay(&id).await?)
}

/// POST /api/accounts-receivable
async fn create_receivable(
    State(container): State<AppState>,
    payload: Result<Json<NewReceivable>, JsonRejection>,
) -> Created<AccountReceivable> {
    let Json(payload) = payload?;
    created(container.receivables_use_case().create(payload).await?)
}

/// GET /api/branches/{id}/accounts-receivable
async fn list_receivables(
    State(container): State<AppState>,
    Path(branch_id): Path<String>,
) -> ApiResult<Vec<AccountReceivable>> {
    ok(container.receivables_use_case().list(&branch_id).await?)
}

/// POST /api/accounts-receivable/{id}/receive
async fn receive_receivable(
    State(container): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<AccountReceivable> {
    ok(container.receivables_use_case().receive(&id).await?)
}
