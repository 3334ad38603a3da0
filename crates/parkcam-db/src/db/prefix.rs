//! Path prefix repository: routes a storage prefix to its park.

use parkcam_core::models::ParkMatch;
use parkcam_core::AppError;
use sqlx::{PgPool, Postgres};

#[derive(Clone)]
pub struct PrefixRepository {
    pool: PgPool,
}

impl PrefixRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the park behind an active prefix, matched exactly.
    ///
    /// `path_prefix` is unique, but if more than one active row ever matches the
    /// prefix is treated as unrouted rather than picking one arbitrarily.
    #[tracing::instrument(skip(self), fields(db.table = "park_path_prefixes", db.operation = "select"))]
    pub async fn find_active(&self, prefix: &str) -> Result<Option<ParkMatch>, AppError> {
        let mut rows: Vec<ParkMatch> = sqlx::query_as::<Postgres, ParkMatch>(
            r#"
            SELECT ppp.park_id, p.name AS park_name
            FROM park_path_prefixes ppp
            LEFT JOIN parks p ON p.id = ppp.park_id
            WHERE ppp.path_prefix = $1 AND ppp.is_active = true
            LIMIT 2
            "#,
        )
        .bind(prefix)
        .fetch_all(&self.pool)
        .await?;

        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            n => {
                tracing::warn!(prefix = %prefix, matches = n, "Ambiguous active path prefix, not routing");
                Ok(None)
            }
        }
    }
}
