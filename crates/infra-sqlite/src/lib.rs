// Usecase Infrastructure - SQLite Adapter
// Implements: Precondition, EntityStore, Compensation for PostLike and Account

mod account_store;
mod connection;
mod error;
mod migration;
mod post_store;

pub use account_store::SqliteAccountStore;
pub use connection::create_pool;
pub use migration::run_migrations;
pub use post_store::SqlitePostStore;

// Note: sqlx::Error is mapped to CollaboratorError in `error`
// (orphan rules forbid implementing From<sqlx::Error> for a core type here)
