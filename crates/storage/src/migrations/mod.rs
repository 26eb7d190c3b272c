//! Schema migrations.
//!
//! A linear, versioned history driven by SQLite's `user_version` pragma.
//! Each step module carries the SQL to apply it and the SQL to reverse it;
//! `run_migrations` walks forward, `rollback` walks backward. A step's
//! version number is only recorded after its batch succeeds, so a failed
//! step leaves `user_version` pointing at the last fully-applied one.

mod v1;
mod v2;
mod v3;
mod v4;
mod v5;

use murmur_core::{SchemaConfig, SocialError};
use rusqlite::Connection;

pub const SCHEMA_VERSION: i32 = 5;

pub fn run_migrations(
    conn: &Connection,
    config: &SchemaConfig,
) -> Result<(), rusqlite::Error> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "busy_timeout", 5000i32)?;
    conn.pragma_update(None, "foreign_keys", "ON")?;

    let current_version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    let users = config.auth_user_table();

    tracing::info!("Database schema version: {} (target: {})", current_version, SCHEMA_VERSION);

    if current_version < 1i32 {
        tracing::info!("Running migration v1: auth table '{}'", users);
        conn.execute_batch(&v1::up_sql(users))?;
        conn.pragma_update(None, "user_version", 1i32)?;
    }

    if current_version < 2i32 {
        tracing::info!("Running migration v2: posts table");
        conn.execute_batch(&v2::up_sql(users))?;
        conn.pragma_update(None, "user_version", 2i32)?;
    }

    if current_version < 3i32 {
        tracing::info!("Running migration v3: tags table and posts.tag_id");
        conn.execute_batch(v3::TAGS_SQL)?;
        add_column_if_not_exists(conn, "posts", "tag_id", "INTEGER")?;
        conn.pragma_update(None, "user_version", 3i32)?;
    }

    if current_version < 4i32 {
        tracing::info!("Running migration v4: single-like relation");
        conn.execute_batch(&v4::up_sql(users))?;
        conn.pragma_update(None, "user_version", 4i32)?;
    }

    if current_version < 5i32 {
        tracing::info!("Running migration v5: post_likes many-to-many relation");
        conn.execute_batch(&v5::up_sql(users))?;
        conn.pragma_update(None, "user_version", 5i32)?;
    }

    tracing::info!("Database schema up to date (version {})", SCHEMA_VERSION);

    Ok(())
}

/// Reverse migrations down to `target` (exclusive of `target` itself).
///
/// Reversing v5 drops only the join table; the single-like relation from
/// v4 is untouched. A `target` at or above the current version is a no-op.
pub fn rollback(
    conn: &Connection,
    target: i32,
    config: &SchemaConfig,
) -> anyhow::Result<()> {
    if target < 0 {
        return Err(
            SocialError::Migration(format!("rollback target must be >= 0, got {}", target)).into()
        );
    }

    let current_version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    if target >= current_version {
        tracing::info!(
            "Nothing to roll back: schema at version {}, target {}",
            current_version,
            target
        );
        return Ok(());
    }

    let users = config.auth_user_table();

    if current_version >= 5i32 && target < 5i32 {
        tracing::info!("Reversing migration v5: dropping post_likes");
        conn.execute_batch(v5::DOWN_SQL)?;
        conn.pragma_update(None, "user_version", 4i32)?;
    }

    if current_version >= 4i32 && target < 4i32 {
        tracing::info!("Reversing migration v4: dropping likes");
        conn.execute_batch(v4::DOWN_SQL)?;
        conn.pragma_update(None, "user_version", 3i32)?;
    }

    if current_version >= 3i32 && target < 3i32 {
        tracing::info!("Reversing migration v3: dropping tags and posts.tag_id");
        conn.execute_batch(v3::DOWN_SQL)?;
        conn.pragma_update(None, "user_version", 2i32)?;
    }

    if current_version >= 2i32 && target < 2i32 {
        tracing::info!("Reversing migration v2: dropping posts");
        conn.execute_batch(v2::DOWN_SQL)?;
        conn.pragma_update(None, "user_version", 1i32)?;
    }

    if current_version >= 1i32 && target < 1i32 {
        tracing::info!("Reversing migration v1: dropping auth table '{}'", users);
        conn.execute_batch(&v1::down_sql(users))?;
        conn.pragma_update(None, "user_version", 0i32)?;
    }

    tracing::info!("Schema rolled back to version {}", target);

    Ok(())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let sql = format!("PRAGMA table_info({})", table);
    let mut stmt = match conn.prepare(&sql) {
        Ok(s) => s,
        Err(_) => return false,
    };
    let rows = match stmt.query_map([], |row| row.get::<_, String>(1)) {
        Ok(r) => r,
        Err(_) => return false,
    };
    for name in rows.flatten() {
        if name == column {
            return true;
        }
    }
    false
}

fn add_column_if_not_exists(
    conn: &Connection,
    table: &str,
    column: &str,
    col_type: &str,
) -> Result<(), rusqlite::Error> {
    if !column_exists(conn, table, column) {
        let sql = format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, col_type);
        conn.execute(&sql, [])?;
    }
    Ok(())
}
