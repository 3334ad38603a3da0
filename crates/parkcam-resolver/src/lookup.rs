//! Read-only lookup capabilities consulted by the cascade.
//!
//! Implementations live outside this crate (Postgres in `parkcam-db`, the
//! in-memory [`crate::memory::MemoryStore`] for snapshots and tests). Each
//! method returns `Ok(None)` for "no active row" and `Err` only when the store
//! could not be queried.

use async_trait::async_trait;
use parkcam_core::models::{CameraMatch, ParkMatch, PhotoRow};
use parkcam_core::AppError;
use uuid::Uuid;

/// Prefix → park routing.
#[async_trait]
pub trait PrefixLookup: Send + Sync {
    /// Find the park owning an active path prefix (exact match).
    async fn find_active_prefix(&self, prefix: &str) -> Result<Option<ParkMatch>, AppError>;
}

/// (park, customer code) → camera.
#[async_trait]
pub trait CameraLookup: Send + Sync {
    /// Find an active camera of `park_id` registered under a 4-digit code.
    async fn find_active_camera(
        &self,
        park_id: Uuid,
        code: &str,
    ) -> Result<Option<CameraMatch>, AppError>;
}

/// Attraction id → display name.
#[async_trait]
pub trait AttractionLookup: Send + Sync {
    async fn find_attraction_name(&self, attraction_id: Uuid) -> Result<Option<String>, AppError>;
}

/// The three capabilities the cascade needs, injected per call.
#[derive(Clone, Copy)]
pub struct Lookups<'a> {
    pub prefixes: &'a dyn PrefixLookup,
    pub cameras: &'a dyn CameraLookup,
    pub attractions: &'a dyn AttractionLookup,
}

impl<'a> Lookups<'a> {
    pub fn new(
        prefixes: &'a dyn PrefixLookup,
        cameras: &'a dyn CameraLookup,
        attractions: &'a dyn AttractionLookup,
    ) -> Self {
        Self {
            prefixes,
            cameras,
            attractions,
        }
    }

    /// Use one store that implements all three capabilities.
    pub fn from_store<S>(store: &'a S) -> Self
    where
        S: PrefixLookup + CameraLookup + AttractionLookup,
    {
        Self::new(store, store, store)
    }
}

/// Column holding the camera code on the `photos` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeColumn {
    CameraCode,
    SourceCustomerCode,
}

impl CodeColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeColumn::CameraCode => "camera_code",
            CodeColumn::SourceCustomerCode => "source_customer_code",
        }
    }
}

/// One way of querying a camera's photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoQueryStrategy {
    pub code_column: CodeColumn,
    pub scope_to_park: bool,
}

/// Strategies tried in order until one succeeds.
///
/// The code column was renamed while photos kept flowing in, and older rows
/// may predate the `park_id` column being filled.
pub const PHOTO_QUERY_STRATEGIES: [PhotoQueryStrategy; 4] = [
    PhotoQueryStrategy {
        code_column: CodeColumn::CameraCode,
        scope_to_park: true,
    },
    PhotoQueryStrategy {
        code_column: CodeColumn::CameraCode,
        scope_to_park: false,
    },
    PhotoQueryStrategy {
        code_column: CodeColumn::SourceCustomerCode,
        scope_to_park: true,
    },
    PhotoQueryStrategy {
        code_column: CodeColumn::SourceCustomerCode,
        scope_to_park: false,
    },
];

/// Source of stored photo rows.
#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// Most recent photos for a camera code, newest first.
    ///
    /// Returns `Err` when the strategy cannot be executed (e.g. the column does
    /// not exist in this schema); an empty result is a successful query.
    async fn query_photos(
        &self,
        strategy: &PhotoQueryStrategy,
        park_id: Uuid,
        code: &str,
        limit: i64,
    ) -> Result<Vec<PhotoRow>, AppError>;
}
