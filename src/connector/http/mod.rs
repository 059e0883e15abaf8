//! JSON REST API over the same use cases the CLI drives.

mod error;
mod response;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::http::StatusCode;
use axum::Json;
use tokio::net::TcpListener;
use tracing::info;

use super::api::Container;

pub use error::ApiError;
pub use response::ApiResponse;

pub type AppState = Arc<Container>;

/// Handler result carrying the enveloped payload.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Handler result for endpoints that create a record.
pub type Created<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

pub(crate) fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

pub(crate) fn created<T>(data: T) -> Created<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data))))
}

/// All routes, mounted under `/api`.
pub fn router(container: Arc<Container>) -> axum::Router {
    axum::Router::new()
        .nest("/api", routes::router())
        .with_state(container)
}

/// Binds 127.0.0.1 (or 0.0.0.0 when `public`) and serves until the process stops.
pub async fn serve(container: Arc<Container>, port: u16, public: bool) -> Result<()> {
    let host = if public { [0, 0, 0, 0] } else { [127, 0, 0, 1] };
    let addr = SocketAddr::from((host, port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP API listening on http://{}/api", listener.local_addr()?);

    axum::serve(listener, router(container)).await?;
    Ok(())
}
