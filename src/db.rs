//! Database connection setup.

use std::time::Duration;

use futures::Future;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;
use crate::error::{Error, Result};

/// Opens a single-connection pool.
///
/// Fails with [`Error::Connect`] when the server cannot be reached within
/// `connect_timeout_secs`.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    let options = config.connect_options()?;
    tracing::info!(database = %config, "connecting");
    PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect_with(options)
        .await
        .map_err(Error::Connect)
}

/// Runs `f` with a freshly opened pool and closes the pool afterwards.
///
/// The pool is closed whether `f` succeeds or fails; the result of `f` is
/// returned unchanged.
///
/// # Example
///
/// ```ignore
/// use dvdrental_report::db::with_pool;
///
/// let authors = with_pool(&config.database, |pool| async move {
///     list_authors(&pool).await
/// }).await?;
/// ```
pub async fn with_pool<F, Fut, R>(config: &DatabaseConfig, f: F) -> Result<R>
where
    F: FnOnce(PgPool) -> Fut,
    Fut: Future<Output = Result<R>>,
{
    let pool = connect(config).await?;
    let result = f(pool.clone()).await;
    pool.close().await;
    tracing::debug!("connection closed");
    result
}
