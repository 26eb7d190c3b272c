use std::sync::Arc;

use axum::{extract::State, Json};
use murmur_core::User;

use crate::api_error::ApiError;
use crate::blocking::blocking_json;
use crate::AppState;

pub async fn get_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<User>>, ApiError> {
    let storage = Arc::clone(&state.storage);
    blocking_json(move || storage.get_users()).await
}
