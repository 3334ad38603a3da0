//! Camera repository: `park_cameras` lookups by customer code.

use parkcam_core::models::CameraMatch;
use parkcam_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

#[derive(Clone)]
pub struct CameraRepository {
    pool: PgPool,
}

impl CameraRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the active camera of a park registered under `customer_code`.
    #[tracing::instrument(
        skip(self),
        fields(db.table = "park_cameras", db.operation = "select", park_id = %park_id)
    )]
    pub async fn find_active(
        &self,
        park_id: Uuid,
        customer_code: &str,
    ) -> Result<Option<CameraMatch>, AppError> {
        let row = sqlx::query_as::<Postgres, CameraMatch>(
            r#"
            SELECT attraction_id
            FROM park_cameras
            WHERE park_id = $1 AND customer_code = $2 AND is_active = true
            "#,
        )
        .bind(park_id)
        .bind(customer_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
