//! Migration v1: auth table
//!
//! The table name comes from `SchemaConfig`, not a literal — deployments
//! point this at whatever table holds their accounts.

pub(super) fn up_sql(users: &str) -> String {
    format!(
        "
CREATE TABLE IF NOT EXISTS {users} (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    email TEXT,
    joined_at TEXT NOT NULL
);
"
    )
}

pub(super) fn down_sql(users: &str) -> String {
    format!("DROP TABLE IF EXISTS {users};")
}
