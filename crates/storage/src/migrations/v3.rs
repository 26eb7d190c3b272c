//! Migration v3: tags table, tag column on posts
//!
//! The column add goes through the runner's add-column helper so re-running
//! against a half-migrated database stays safe.

pub(super) const TAGS_SQL: &str = "
CREATE TABLE IF NOT EXISTS tags (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tag TEXT NOT NULL UNIQUE
);
";

pub(super) const DOWN_SQL: &str = "
ALTER TABLE posts DROP COLUMN tag_id;
DROP TABLE IF EXISTS tags;
";
