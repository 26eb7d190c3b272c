//! Helpers for running blocking storage calls in async handlers.
//!
//! Eliminates the boilerplate of spawning a blocking task, handling the
//! join error, handling the storage error, and wrapping the result in
//! `Json`.

use axum::Json;
use serde::Serialize;
use tokio::task::spawn_blocking;

use crate::api_error::ApiError;

/// Runs a blocking closure and returns `Result<Json<T>, ApiError>`.
pub async fn blocking_json<T, F>(f: F) -> Result<Json<T>, ApiError>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static + Serialize,
{
    blocking_result(f).await.map(Json)
}

/// Runs a blocking closure and returns the raw value for further
/// processing.
pub async fn blocking_result<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("join error: {}", e)))?
        .map_err(ApiError::Internal)
}
