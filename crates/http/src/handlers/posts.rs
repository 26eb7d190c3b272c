use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use murmur_core::{Post, Tag};

use crate::api_error::ApiError;
use crate::api_types::CreatePostRequest;
use crate::blocking::{blocking_json, blocking_result};
use crate::AppState;

pub async fn get_posts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let storage = Arc::clone(&state.storage);
    blocking_json(move || storage.get_posts()).await
}

pub async fn get_tags(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Tag>>, ApiError> {
    let storage = Arc::clone(&state.storage);
    blocking_json(move || storage.get_tags()).await
}

pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let caption = req.caption.trim().to_owned();
    if caption.is_empty() {
        return Err(ApiError::BadRequest("caption must not be empty".to_owned()));
    }

    let storage = Arc::clone(&state.storage);
    let author = blocking_result(move || storage.get_user(req.author)).await?;
    if author.is_none() {
        return Err(ApiError::BadRequest(format!("unknown author {}", req.author)));
    }

    let storage = Arc::clone(&state.storage);
    let post = blocking_result(move || {
        storage.create_post(req.author, &caption, req.image.as_deref(), req.tag)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let storage = Arc::clone(&state.storage);
    let deleted = blocking_result(move || storage.delete_post(id)).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("post {} not found", id)))
    }
}
