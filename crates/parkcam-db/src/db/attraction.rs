use parkcam_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for the attractions table.
#[derive(Clone)]
pub struct AttractionRepository {
    pool: PgPool,
}

impl AttractionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Display name of an attraction. Deactivated attractions still have a name.
    #[tracing::instrument(skip(self), fields(db.table = "attractions", db.record_id = %id))]
    pub async fn get_name(&self, id: Uuid) -> Result<Option<String>, AppError> {
        let name: Option<String> =
            sqlx::query_scalar::<Postgres, String>("SELECT name FROM attractions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(name)
    }
}
