//! Pool setup and [`PgStore`], the Postgres implementation of the resolver's
//! lookup traits.

use async_trait::async_trait;
use parkcam_core::models::{CameraMatch, ParkMatch, PhotoRow};
use parkcam_core::{AppError, Config};
use parkcam_resolver::{
    AttractionLookup, CameraLookup, PhotoQueryStrategy, PhotoSource, PrefixLookup,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::{AttractionRepository, CameraRepository, PhotoRepository, PrefixRepository};

/// Connect to Postgres with the configured pool limits.
pub async fn create_pool(config: &Config) -> Result<PgPool, AppError> {
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_timeout())
        .connect(&config.database_url)
        .await?;

    tracing::info!(
        max_connections = config.db_max_connections,
        "Database connected successfully"
    );
    Ok(pool)
}

/// All repositories over one pool.
#[derive(Clone)]
pub struct PgStore {
    pub prefixes: PrefixRepository,
    pub cameras: CameraRepository,
    pub attractions: AttractionRepository,
    pub photos: PhotoRepository,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            prefixes: PrefixRepository::new(pool.clone()),
            cameras: CameraRepository::new(pool.clone()),
            attractions: AttractionRepository::new(pool.clone()),
            photos: PhotoRepository::new(pool),
        }
    }
}

#[async_trait]
impl PrefixLookup for PgStore {
    async fn find_active_prefix(&self, prefix: &str) -> Result<Option<ParkMatch>, AppError> {
        self.prefixes.find_active(prefix).await
    }
}

#[async_trait]
impl CameraLookup for PgStore {
    async fn find_active_camera(
        &self,
        park_id: Uuid,
        code: &str,
    ) -> Result<Option<CameraMatch>, AppError> {
        self.cameras.find_active(park_id, code).await
    }
}

#[async_trait]
impl AttractionLookup for PgStore {
    async fn find_attraction_name(&self, attraction_id: Uuid) -> Result<Option<String>, AppError> {
        self.attractions.get_name(attraction_id).await
    }
}

#[async_trait]
impl PhotoSource for PgStore {
    async fn query_photos(
        &self,
        strategy: &PhotoQueryStrategy,
        park_id: Uuid,
        code: &str,
        limit: i64,
    ) -> Result<Vec<PhotoRow>, AppError> {
        self.photos.list_by_code(strategy, park_id, code, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkcam_resolver::{preview, Lookups};

    // A lazy pool never connects until queried, so an unreachable database
    // shows up as a store failure on the first lookup.
    #[tokio::test]
    async fn unreachable_database_is_a_store_failure_not_a_miss() {
        let pool = PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_millis(200))
            .connect_lazy("postgres://parkcam@127.0.0.1:1/parkcam")
            .unwrap();
        let store = PgStore::new(pool);

        let err = preview(
            "plose-plosebob/1963186224002020.jpg",
            Lookups::from_store(&store),
        )
        .await
        .unwrap_err();

        assert!(err.is_store_failure());
    }

    #[tokio::test]
    async fn path_without_prefix_never_queries() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://parkcam@127.0.0.1:1/parkcam")
            .unwrap();
        let store = PgStore::new(pool);

        let result = preview("1963186224002020.jpg", Lookups::from_store(&store))
            .await
            .unwrap();

        assert!(result.identity.is_empty());
    }
}
