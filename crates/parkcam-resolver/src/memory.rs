//! In-memory lookup store.
//!
//! Implements every lookup capability over plain vectors. Used for offline
//! previews against an exported JSON snapshot of the dashboard tables and as
//! the fake store in tests. Matching rules mirror the Postgres adapter: exact
//! prefix and code comparison, inactive rows invisible, ambiguous prefixes
//! unresolved.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parkcam_core::models::{
    Attraction, Camera, CameraMatch, ParkMatch, Park, PathPrefix, PhotoRow,
};
use parkcam_core::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::lookup::{
    AttractionLookup, CameraLookup, CodeColumn, PhotoQueryStrategy, PhotoSource, PrefixLookup,
};

/// A stored photo with the columns the listing strategies filter on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotPhoto {
    #[serde(flatten)]
    pub row: PhotoRow,
    #[serde(default)]
    pub park_id: Option<Uuid>,
    #[serde(default)]
    pub camera_code: Option<String>,
    #[serde(default)]
    pub source_customer_code: Option<String>,
}

impl SnapshotPhoto {
    fn code(&self, column: CodeColumn) -> Option<&str> {
        match column {
            CodeColumn::CameraCode => self.camera_code.as_deref(),
            CodeColumn::SourceCustomerCode => self.source_customer_code.as_deref(),
        }
    }
}

/// Exported copy of the dashboard tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub parks: Vec<Park>,
    #[serde(default)]
    pub prefixes: Vec<PathPrefix>,
    #[serde(default)]
    pub cameras: Vec<Camera>,
    #[serde(default)]
    pub attractions: Vec<Attraction>,
    #[serde(default)]
    pub photos: Vec<SnapshotPhoto>,
}

impl Snapshot {
    /// Whether the exported photos table has `column`.
    ///
    /// Exports omit columns the source schema lacked, so a column no photo
    /// carries is treated as absent. An empty table has every column.
    pub fn has_photo_column(&self, column: CodeColumn) -> bool {
        self.photos.is_empty() || self.photos.iter().any(|p| p.code(column).is_some())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Snapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            tables: Mutex::new(snapshot),
        }
    }

    /// Load a snapshot exported as JSON.
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                AppError::NotFound(format!("snapshot {}", path.display()))
            }
            _ => AppError::from(e),
        })?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            parks = snapshot.parks.len(),
            prefixes = snapshot.prefixes.len(),
            cameras = snapshot.cameras.len(),
            attractions = snapshot.attractions.len(),
            photos = snapshot.photos.len(),
            "Loaded lookup snapshot"
        );
        Ok(Self::from_snapshot(snapshot))
    }

    fn tables(&self) -> MutexGuard<'_, Snapshot> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_park(&self, slug: &str, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.tables().parks.push(Park {
            id,
            slug: slug.to_string(),
            name: name.to_string(),
            is_active: true,
        });
        id
    }

    pub fn add_prefix(&self, park_id: Uuid, path_prefix: &str, is_active: bool) -> Uuid {
        let id = Uuid::new_v4();
        self.tables().prefixes.push(PathPrefix {
            id,
            park_id,
            path_prefix: path_prefix.to_string(),
            is_active,
        });
        id
    }

    pub fn add_attraction(&self, park_id: Uuid, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.tables().attractions.push(Attraction {
            id,
            park_id,
            slug: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            is_active: true,
        });
        id
    }

    pub fn add_camera(
        &self,
        park_id: Uuid,
        customer_code: &str,
        attraction_id: Option<Uuid>,
        is_active: bool,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.tables().cameras.push(Camera {
            id,
            park_id,
            customer_code: customer_code.to_string(),
            camera_name: None,
            attraction_id,
            is_active,
        });
        id
    }

    pub fn add_photo(&self, photo: SnapshotPhoto) {
        self.tables().photos.push(photo);
    }

    /// Convenience for tests and fixtures: a photo filed under `camera_code`.
    pub fn add_camera_photo(
        &self,
        park_id: Uuid,
        camera_code: &str,
        bucket: &str,
        path: &str,
        captured_at: DateTime<Utc>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.add_photo(SnapshotPhoto {
            row: PhotoRow {
                id,
                captured_at,
                storage_bucket: bucket.to_string(),
                storage_path: path.to_string(),
            },
            park_id: Some(park_id),
            camera_code: Some(camera_code.to_string()),
            source_customer_code: None,
        });
        id
    }
}

#[async_trait]
impl PrefixLookup for MemoryStore {
    async fn find_active_prefix(&self, prefix: &str) -> Result<Option<ParkMatch>, AppError> {
        let tables = self.tables();
        let mut active = tables
            .prefixes
            .iter()
            .filter(|p| p.is_active && p.path_prefix == prefix);

        let (Some(row), None) = (active.next(), active.next()) else {
            return Ok(None);
        };

        let park_name = tables
            .parks
            .iter()
            .find(|park| park.id == row.park_id)
            .map(|park| park.name.clone());

        Ok(Some(ParkMatch {
            park_id: row.park_id,
            park_name,
        }))
    }
}

#[async_trait]
impl CameraLookup for MemoryStore {
    async fn find_active_camera(
        &self,
        park_id: Uuid,
        code: &str,
    ) -> Result<Option<CameraMatch>, AppError> {
        Ok(self
            .tables()
            .cameras
            .iter()
            .find(|c| c.is_active && c.park_id == park_id && c.customer_code == code)
            .map(|c| CameraMatch {
                attraction_id: c.attraction_id,
            }))
    }
}

#[async_trait]
impl AttractionLookup for MemoryStore {
    async fn find_attraction_name(&self, attraction_id: Uuid) -> Result<Option<String>, AppError> {
        Ok(self
            .tables()
            .attractions
            .iter()
            .find(|a| a.id == attraction_id)
            .map(|a| a.name.clone()))
    }
}

#[async_trait]
impl PhotoSource for MemoryStore {
    async fn query_photos(
        &self,
        strategy: &PhotoQueryStrategy,
        park_id: Uuid,
        code: &str,
        limit: i64,
    ) -> Result<Vec<PhotoRow>, AppError> {
        let tables = self.tables();
        if !tables.has_photo_column(strategy.code_column) {
            return Err(AppError::Storage(format!(
                "column photos.{} does not exist",
                strategy.code_column.as_str()
            )));
        }

        let mut rows: Vec<PhotoRow> = tables
            .photos
            .iter()
            .filter(|p| p.code(strategy.code_column) == Some(code))
            .filter(|p| !strategy.scope_to_park || p.park_id == Some(park_id))
            .map(|p| p.row.clone())
            .collect();

        rows.sort_by(|a, b| b.captured_at.cmp(&a.captured_at));
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(rows)
    }
}
