//! Storage layer for murmur
//!
//! SQLite-based storage. The schema is built by a linear chain of versioned
//! migrations; the final step adds the `post_likes` many-to-many relation
//! between posts and the configured auth table.

mod migrations;
mod storage;
#[cfg(test)]
mod tests;

pub use migrations::{rollback, run_migrations, SCHEMA_VERSION};
pub use storage::{Storage, StorageStats};
