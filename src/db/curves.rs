use chrono::NaiveDate;
use sqlx::PgPool;

use crate::error::AppError;

/// One pricing observation for a bond.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PricingRow {
    pub isin: String,
    pub maturity_date: NaiveDate,
    pub yield_to_maturity: f64,
}

/// Resolve the LEI for the given ISIN, expand to every ISIN sharing that
/// issuer, and pull all pricing rows for the set. The ISIN is bound as a
/// typed parameter; it must never be interpolated into the query text.
const YIELD_CURVE_SQL: &str = "\
    SELECT isin, maturity_date, yield_to_maturity
    FROM bonds_pricing
    WHERE isin IN (
        SELECT isin
        FROM bonds_reference
        WHERE lei = (
            SELECT lei
            FROM bonds_reference
            WHERE isin = $1
        )
    )";

/// Fetch the yield-curve rows for a bond and its issuer siblings.
///
/// An unknown ISIN (no LEI match, or no pricing history) returns an empty
/// vector; that is a valid outcome, not an error. No row order is guaranteed.
pub async fn fetch_yield_curve(pool: &PgPool, isin: &str) -> Result<Vec<PricingRow>, AppError> {
    let rows = sqlx::query_as::<_, PricingRow>(YIELD_CURVE_SQL)
        .bind(isin)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
