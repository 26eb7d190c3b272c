//! Migration v2: posts table

pub(super) fn up_sql(users: &str) -> String {
    format!(
        "
CREATE TABLE IF NOT EXISTS posts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    author_id INTEGER NOT NULL REFERENCES {users}(id),
    caption TEXT NOT NULL,
    image TEXT,
    date_posted TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_posts_author ON posts(author_id);
"
    )
}

pub(super) const DOWN_SQL: &str = "DROP TABLE IF EXISTS posts;";
