use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::api_error::ApiError;
use crate::api_types::{LikeResponse, LikedPostsResponse, UnlikeResponse, UserQuery};
use crate::blocking::{blocking_json, blocking_result};
use crate::AppState;

/// Record a like. Idempotent: liking an already-liked post reports
/// `liked: false` and leaves a single row behind.
pub async fn like(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
    Query(query): Query<UserQuery>,
) -> Result<Json<LikeResponse>, ApiError> {
    ensure_post_and_user(&state, post_id, query.user_id).await?;

    let storage = Arc::clone(&state.storage);
    let liked = blocking_result(move || storage.like_post(post_id, query.user_id)).await?;
    Ok(Json(LikeResponse { liked }))
}

pub async fn unlike(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
    Query(query): Query<UserQuery>,
) -> Result<Json<UnlikeResponse>, ApiError> {
    ensure_post_and_user(&state, post_id, query.user_id).await?;

    let storage = Arc::clone(&state.storage);
    let unliked = blocking_result(move || storage.unlike_post(post_id, query.user_id)).await?;
    Ok(Json(UnlikeResponse { unliked }))
}

/// Reverse accessor: posts the acting user has liked.
pub async fn liked_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> Result<Json<LikedPostsResponse>, ApiError> {
    let storage = Arc::clone(&state.storage);
    let liked_posts = blocking_result(move || storage.liked_posts(query.user_id)).await?;
    Ok(Json(LikedPostsResponse { liked_posts }))
}

/// Users who liked a post, for the likes modal.
pub async fn post_likes(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<Json<Vec<i64>>, ApiError> {
    let storage = Arc::clone(&state.storage);
    let post = blocking_result(move || storage.get_post(post_id)).await?;
    if post.is_none() {
        return Err(ApiError::NotFound(format!("post {} not found", post_id)));
    }

    let storage = Arc::clone(&state.storage);
    blocking_json(move || storage.post_likes(post_id)).await
}

async fn ensure_post_and_user(
    state: &Arc<AppState>,
    post_id: i64,
    user_id: i64,
) -> Result<(), ApiError> {
    let storage = Arc::clone(&state.storage);
    let post = blocking_result(move || storage.get_post(post_id)).await?;
    if post.is_none() {
        return Err(ApiError::NotFound(format!("post {} not found", post_id)));
    }

    let storage = Arc::clone(&state.storage);
    let user = blocking_result(move || storage.get_user(user_id)).await?;
    if user.is_none() {
        return Err(ApiError::NotFound(format!("user {} not found", user_id)));
    }

    Ok(())
}
