//! HTTP API server for murmur.
//!
//! Route paths mirror what the web client calls, trailing slashes
//! included.

pub mod api_error;
mod api_types;
mod blocking;
mod handlers;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use murmur_storage::Storage;

pub use api_types::{LikeResponse, LikedPostsResponse, UnlikeResponse, VersionResponse};

/// Shared application state for all HTTP handlers.
pub struct AppState {
    pub storage: Arc<Storage>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/api/get_users/", get(handlers::users::get_users))
        .route("/api/get_tags/", get(handlers::posts::get_tags))
        .route("/api/get_posts/", get(handlers::posts::get_posts))
        .route("/api/create_post/", post(handlers::posts::create_post))
        .route("/api/delete_post/{id}/", delete(handlers::posts::delete_post))
        .route("/api/like/{post_id}/", post(handlers::likes::like))
        .route("/api/unlike/{post_id}/", delete(handlers::likes::unlike))
        .route("/api/liked_posts/", get(handlers::likes::liked_posts))
        .route("/api/post_likes/{post_id}/", get(handlers::likes::post_likes))
        // the web client is served from another origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
