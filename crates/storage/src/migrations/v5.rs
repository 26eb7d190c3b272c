//! Migration v5: post_likes many-to-many relation
//!
//! Join table between posts and the configured auth table. The unique
//! index on (post_id, user_id) makes a like a single fact — inserting the
//! same pair twice is a conflict, not a second row. A post with no rows
//! here is simply a post nobody has liked.

pub(super) fn up_sql(users: &str) -> String {
    format!(
        "
CREATE TABLE IF NOT EXISTS post_likes (
    post_id INTEGER NOT NULL REFERENCES posts(id),
    user_id INTEGER NOT NULL REFERENCES {users}(id)
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_post_likes_pair ON post_likes(post_id, user_id);
CREATE INDEX IF NOT EXISTS idx_post_likes_user ON post_likes(user_id);
"
    )
}

pub(super) const DOWN_SQL: &str = "DROP TABLE IF EXISTS post_likes;";
