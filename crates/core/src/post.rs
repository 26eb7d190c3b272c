use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author: i64,
    pub caption: String,
    pub image: Option<String>,
    pub tag: Option<i64>,
    pub date_posted: DateTime<Utc>,
    /// Ids of users who liked this post. Empty is valid; order is not
    /// significant.
    pub likes: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub tag: String,
}
