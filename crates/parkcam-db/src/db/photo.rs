//! Photo repository: most recent photos filed under a camera code.

use parkcam_core::models::PhotoRow;
use parkcam_core::AppError;
use parkcam_resolver::PhotoQueryStrategy;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

#[derive(Clone)]
pub struct PhotoRepository {
    pool: PgPool,
}

/// SQL for one listing strategy.
///
/// Only the column name is interpolated, and it comes from a closed enum.
/// Binds: `$1` code, `$2` limit, `$3` park id when scoped.
pub(crate) fn listing_sql(strategy: &PhotoQueryStrategy) -> String {
    let park_filter = if strategy.scope_to_park {
        " AND park_id = $3"
    } else {
        ""
    };
    format!(
        "SELECT id, captured_at, storage_bucket, storage_path FROM photos \
         WHERE {column} = $1{park_filter} ORDER BY captured_at DESC LIMIT $2",
        column = strategy.code_column.as_str(),
    )
}

impl PhotoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List photos newest first using one strategy.
    ///
    /// A schema without the strategy's column surfaces as a database error, so
    /// the caller can move on to the next strategy.
    #[tracing::instrument(
        skip(self),
        fields(
            db.table = "photos",
            db.operation = "select",
            column = strategy.code_column.as_str(),
            scope_to_park = strategy.scope_to_park
        )
    )]
    pub async fn list_by_code(
        &self,
        strategy: &PhotoQueryStrategy,
        park_id: Uuid,
        code: &str,
        limit: i64,
    ) -> Result<Vec<PhotoRow>, AppError> {
        let sql = listing_sql(strategy);
        let mut query = sqlx::query_as::<Postgres, PhotoRow>(&sql)
            .bind(code)
            .bind(limit);
        if strategy.scope_to_park {
            query = query.bind(park_id);
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows)
    }
}
