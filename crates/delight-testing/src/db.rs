//! In-memory SQLite for store tests.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Open a private in-memory SQLite database.
///
/// The pool is pinned to a single connection: every SQLite `:memory:`
/// connection is a separate database. Run migrations on the result.
pub async fn memory_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    Database::connect(options).await.unwrap()
}
