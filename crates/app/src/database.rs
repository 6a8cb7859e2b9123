//! Database connection management

use sqlx::{PgPool, Row, migrate::MigrateError, postgres::PgRow};

use crate::store::StoreError;

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Apply the bundled schema migrations.
///
/// # Errors
///
/// Returns an error when a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Read a non-negative `BIGINT` column as an amount in minor currency units.
pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Read a non-negative `INTEGER` column as a count.
pub(crate) fn try_get_count(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let count_i32: i32 = row.try_get(col)?;

    u32::try_from(count_i32).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Convert an amount to its `BIGINT` bind value.
pub(crate) fn amount_param(value: u64, col: &'static str) -> Result<i64, StoreError> {
    i64::try_from(value).map_err(|_overflow| StoreError::OutOfRange(col))
}

/// Convert a count to its `INTEGER` bind value.
pub(crate) fn count_param(value: u32, col: &'static str) -> Result<i32, StoreError> {
    i32::try_from(value).map_err(|_overflow| StoreError::OutOfRange(col))
}
