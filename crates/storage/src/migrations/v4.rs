//! Migration v4: single-like relation
//!
//! One row per like event, with its own id and timestamp. Superseded by
//! the v5 join table for runtime use, but kept in the history — v5 is
//! declared on top of it and reversing v5 must leave it intact.

pub(super) fn up_sql(users: &str) -> String {
    format!(
        "
CREATE TABLE IF NOT EXISTS likes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    post_id INTEGER NOT NULL REFERENCES posts(id),
    user_id INTEGER NOT NULL REFERENCES {users}(id),
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_likes_post ON likes(post_id);
CREATE INDEX IF NOT EXISTS idx_likes_user ON likes(user_id);
"
    )
}

pub(super) const DOWN_SQL: &str = "DROP TABLE IF EXISTS likes;";
