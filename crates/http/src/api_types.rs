use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub author: i64,
    pub caption: String,
    pub image: Option<String>,
    pub tag: Option<i64>,
}

/// The acting user. Auth is out of scope; callers identify themselves with
/// a query parameter.
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub liked: bool,
}

#[derive(Debug, Serialize)]
pub struct UnlikeResponse {
    pub unliked: bool,
}

/// Payload shape the web client reads: `{"liked_posts": [...]}`.
#[derive(Debug, Serialize)]
pub struct LikedPostsResponse {
    pub liked_posts: Vec<i64>,
}
