//! SQLite storage implementation

use anyhow::Result;
use chrono::Utc;
use murmur_core::{Post, SchemaConfig, SocialError, Tag, User};
use rusqlite::{params, Connection};
use serde::Serialize;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use crate::migrations;

pub struct Storage {
    conn: Arc<Mutex<Connection>>,
    config: SchemaConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct StorageStats {
    pub user_count: u64,
    pub post_count: u64,
    pub like_count: u64,
    pub schema_version: i32,
}

fn lock_conn<T>(mutex: &Mutex<T>) -> Result<std::sync::MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|e: PoisonError<_>| anyhow::anyhow!("Database lock poisoned: {}", e))
}

fn log_row_error<T>(result: rusqlite::Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("Row read error: {}", e);
            None
        }
    }
}

fn parse_timestamp(s: &str) -> rusqlite::Result<chrono::DateTime<Utc>> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
        .map(|d| d.with_timezone(&Utc))
}

impl Storage {
    /// Open a database with the auth table name resolved from the
    /// environment. Runs pending migrations.
    pub fn new(db_path: &Path) -> Result<Self> {
        Self::with_config(db_path, SchemaConfig::from_env())
    }

    pub fn with_config(db_path: &Path, config: SchemaConfig) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        let storage = Self {
            conn: Arc::new(Mutex::new(conn)),
            config,
        };

        let conn = lock_conn(&storage.conn)?;
        migrations::run_migrations(&conn, &storage.config)
            .map_err(|e| SocialError::Migration(e.to_string()))?;
        drop(conn);

        Ok(storage)
    }

    pub fn schema_version(&self) -> Result<i32> {
        let conn = lock_conn(&self.conn)?;
        let version = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
        Ok(version)
    }

    /// Reverse migrations down to `target`. See [`migrations::rollback`].
    pub fn rollback_to(&self, target: i32) -> Result<()> {
        let conn = lock_conn(&self.conn)?;
        migrations::rollback(&conn, target, &self.config)
    }

    /// Re-apply pending migrations, e.g. after a rollback.
    pub fn migrate(&self) -> Result<()> {
        let conn = lock_conn(&self.conn)?;
        migrations::run_migrations(&conn, &self.config)
            .map_err(|e| SocialError::Migration(e.to_string()))?;
        Ok(())
    }

    // ── Users ────────────────────────────────────────────────────

    pub fn create_user(&self, username: &str, email: Option<&str>) -> Result<User> {
        let joined_at = Utc::now();
        let conn = lock_conn(&self.conn)?;
        conn.execute(
            &format!(
                "INSERT INTO {} (username, email, joined_at) VALUES (?1, ?2, ?3)",
                self.config.auth_user_table()
            ),
            params![username, email, joined_at.to_rfc3339()],
        )?;
        Ok(User {
            id: conn.last_insert_rowid(),
            username: username.to_owned(),
            email: email.map(ToOwned::to_owned),
            joined_at,
        })
    }

    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = lock_conn(&self.conn)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT id, username, email, joined_at FROM {} WHERE id = ?1",
            self.config.auth_user_table()
        ))?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            Ok(Some(User {
                id: row.get(0)?,
                username: row.get(1)?,
                email: row.get(2)?,
                joined_at: parse_timestamp(&row.get::<_, String>(3)?)?,
            }))
        } else {
            Ok(None)
        }
    }

    pub fn get_users(&self) -> Result<Vec<User>> {
        let conn = lock_conn(&self.conn)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT id, username, email, joined_at FROM {} ORDER BY id",
            self.config.auth_user_table()
        ))?;
        let users = stmt
            .query_map([], |row| {
                Ok(User {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    email: row.get(2)?,
                    joined_at: parse_timestamp(&row.get::<_, String>(3)?)?,
                })
            })?
            .filter_map(log_row_error)
            .collect();
        Ok(users)
    }

    // ── Tags ─────────────────────────────────────────────────────

    pub fn create_tag(&self, tag: &str) -> Result<Tag> {
        let conn = lock_conn(&self.conn)?;
        conn.execute("INSERT INTO tags (tag) VALUES (?1)", params![tag])?;
        Ok(Tag {
            id: conn.last_insert_rowid(),
            tag: tag.to_owned(),
        })
    }

    pub fn get_tags(&self) -> Result<Vec<Tag>> {
        let conn = lock_conn(&self.conn)?;
        let mut stmt = conn.prepare("SELECT id, tag FROM tags ORDER BY id")?;
        let tags = stmt
            .query_map([], |row| {
                Ok(Tag {
                    id: row.get(0)?,
                    tag: row.get(1)?,
                })
            })?
            .filter_map(log_row_error)
            .collect();
        Ok(tags)
    }

    // ── Posts ────────────────────────────────────────────────────

    pub fn create_post(
        &self,
        author: i64,
        caption: &str,
        image: Option<&str>,
        tag: Option<i64>,
    ) -> Result<Post> {
        let date_posted = Utc::now();
        let conn = lock_conn(&self.conn)?;
        conn.execute(
            r#"INSERT INTO posts (author_id, caption, image, date_posted, tag_id)
               VALUES (?1, ?2, ?3, ?4, ?5)"#,
            params![author, caption, image, date_posted.to_rfc3339(), tag],
        )?;
        Ok(Post {
            id: conn.last_insert_rowid(),
            author,
            caption: caption.to_owned(),
            image: image.map(ToOwned::to_owned),
            tag,
            date_posted,
            likes: Vec::new(),
        })
    }

    pub fn get_post(&self, id: i64) -> Result<Option<Post>> {
        let conn = lock_conn(&self.conn)?;
        let mut stmt = conn.prepare(
            r#"SELECT id, author_id, caption, image, tag_id, date_posted
               FROM posts WHERE id = ?1"#,
        )?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            let mut post = Post {
                id: row.get(0)?,
                author: row.get(1)?,
                caption: row.get(2)?,
                image: row.get(3)?,
                tag: row.get(4)?,
                date_posted: parse_timestamp(&row.get::<_, String>(5)?)?,
                likes: Vec::new(),
            };
            drop(rows);
            drop(stmt);
            post.likes = likers_for_post(&conn, post.id)?;
            Ok(Some(post))
        } else {
            Ok(None)
        }
    }

    pub fn get_posts(&self) -> Result<Vec<Post>> {
        let conn = lock_conn(&self.conn)?;
        let mut stmt = conn.prepare(
            r#"SELECT id, author_id, caption, image, tag_id, date_posted
               FROM posts ORDER BY date_posted DESC"#,
        )?;
        let mut posts: Vec<Post> = stmt
            .query_map([], |row| {
                Ok(Post {
                    id: row.get(0)?,
                    author: row.get(1)?,
                    caption: row.get(2)?,
                    image: row.get(3)?,
                    tag: row.get(4)?,
                    date_posted: parse_timestamp(&row.get::<_, String>(5)?)?,
                    likes: Vec::new(),
                })
            })?
            .filter_map(log_row_error)
            .collect();
        drop(stmt);
        for post in &mut posts {
            post.likes = likers_for_post(&conn, post.id)?;
        }
        Ok(posts)
    }

    /// Delete a post and its like rows. Returns `false` when the post
    /// doesn't exist.
    pub fn delete_post(&self, id: i64) -> Result<bool> {
        let mut conn = lock_conn(&self.conn)?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM post_likes WHERE post_id = ?1", params![id])?;
        tx.execute("DELETE FROM likes WHERE post_id = ?1", params![id])?;
        let deleted = tx.execute("DELETE FROM posts WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(deleted > 0)
    }

    // ── Likes ────────────────────────────────────────────────────

    /// Record that `user_id` likes `post_id`. Returns `false` when the
    /// pair already exists — a like is a single fact, so liking twice is
    /// not an error and leaves one row.
    pub fn like_post(&self, post_id: i64, user_id: i64) -> Result<bool> {
        let conn = lock_conn(&self.conn)?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO post_likes (post_id, user_id) VALUES (?1, ?2)",
            params![post_id, user_id],
        )?;
        Ok(inserted > 0)
    }

    /// Remove the like pair. Returns `false` when it wasn't there.
    pub fn unlike_post(&self, post_id: i64, user_id: i64) -> Result<bool> {
        let conn = lock_conn(&self.conn)?;
        let deleted = conn.execute(
            "DELETE FROM post_likes WHERE post_id = ?1 AND user_id = ?2",
            params![post_id, user_id],
        )?;
        Ok(deleted > 0)
    }

    /// Ids of users who liked the post.
    pub fn post_likes(&self, post_id: i64) -> Result<Vec<i64>> {
        let conn = lock_conn(&self.conn)?;
        likers_for_post(&conn, post_id)
    }

    /// Reverse accessor: ids of posts the user has liked.
    pub fn liked_posts(&self, user_id: i64) -> Result<Vec<i64>> {
        let conn = lock_conn(&self.conn)?;
        let mut stmt =
            conn.prepare("SELECT post_id FROM post_likes WHERE user_id = ?1")?;
        let ids = stmt
            .query_map(params![user_id], |row| row.get(0))?
            .filter_map(log_row_error)
            .collect();
        Ok(ids)
    }

    pub fn likes_count(&self, post_id: i64) -> Result<u64> {
        let conn = lock_conn(&self.conn)?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM post_likes WHERE post_id = ?1",
            params![post_id],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    // ── Stats ────────────────────────────────────────────────────

    pub fn get_stats(&self) -> Result<StorageStats> {
        let conn = lock_conn(&self.conn)?;
        let user_count: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", self.config.auth_user_table()),
            [],
            |row| row.get(0),
        )?;
        let post_count: i64 = conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
        let like_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM post_likes", [], |row| row.get(0))?;
        let schema_version: i32 =
            conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
        Ok(StorageStats {
            user_count: user_count as u64,
            post_count: post_count as u64,
            like_count: like_count as u64,
            schema_version,
        })
    }
}

fn likers_for_post(conn: &Connection, post_id: i64) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare("SELECT user_id FROM post_likes WHERE post_id = ?1")?;
    let ids = stmt
        .query_map(params![post_id], |row| row.get(0))?
        .filter_map(log_row_error)
        .collect();
    Ok(ids)
}
