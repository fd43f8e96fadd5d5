//! Process-wide Postgres connection pool.
//!
//! The pool is created on first use and shared by every request for the
//! lifetime of the process. Concurrent first calls wait on the same
//! initialization, so only one pool is ever built.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::OnceCell;

/// Maximum connections held by the pool.
pub const MAX_CONNECTIONS: u32 = 5;

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Returns the shared pool, connecting on the first call.
///
/// A failed first connection is not cached; the next call retries.
///
/// # Errors
///
/// Returns the sqlx error if the database cannot be reached.
pub async fn shared_pool(database_url: &str) -> Result<&'static PgPool, sqlx::Error> {
    POOL.get_or_try_init(|| async {
        tracing::info!(max_connections = MAX_CONNECTIONS, "Connecting to database");
        PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(database_url)
            .await
    })
    .await
}
