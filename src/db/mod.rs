pub mod curves;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::AppError;

/// Create the shared connection pool for the process lifetime.
///
/// The pool is lazy: no connection is attempted until the first query, so a
/// database that is down at startup only surfaces when a lookup runs.
pub fn lazy_pool(url: &str, max_size: u32) -> Result<PgPool, AppError> {
    PgPoolOptions::new()
        .max_connections(max_size)
        .connect_lazy(url)
        .map_err(|e| AppError::Db(format!("invalid connection URL: {e}")))
}
