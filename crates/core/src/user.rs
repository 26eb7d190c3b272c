use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account row from the configured auth table.
///
/// The table backing this type is resolved at runtime through
/// [`SchemaConfig`](crate::SchemaConfig), not hard-coded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub joined_at: DateTime<Utc>,
}
