use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::connector::http::{created, ok, ApiResult, AppState, Created};
use crate::domain::Branch;

#[derive(Debug, Deserialize)]
pub struct CreateBranch {
    pub name: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/branches", get(list_branches).post(create_branch))
        .route("/branches/{id}", get(get_branch))
}

/// POST /api/branches
async fn create_branch(
    State(container): State<AppState>,
    payload: Result<Json<CreateBranch>, JsonRejection>,
) -> Created<Branch> {
    let Json(payload) = payload?;
    let branch = container.branches_use_case().create(&payload.name).await?;
    created(branch)
}

/// GET /api/branches
async fn list_branches(State(container): State<AppState>) -> ApiResult<Vec<Branch>> {
    ok(container.branches_use_case().list().await?)
}

/// GET /api/branches/{id}
async fn get_branch(
    State(container): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Branch> {
    ok(container.branches_use_case().get(&id).await?)
}
