//! Stored photo references and their display URLs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a stored photo lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoReference {
    pub id: Uuid,
    pub bucket: String,
    pub path: String,
    pub captured_at: DateTime<Utc>,
}

/// A photo id paired with a URL a browser can load, if one could be produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayUrl {
    pub id: Uuid,
    pub url: Option<String>,
}

/// Row of the `photos` table as listed on the camera page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PhotoRow {
    pub id: Uuid,
    pub captured_at: DateTime<Utc>,
    pub storage_bucket: String,
    pub storage_path: String,
}

impl From<&PhotoRow> for PhotoReference {
    fn from(row: &PhotoRow) -> Self {
        PhotoReference {
            id: row.id,
            bucket: row.storage_bucket.clone(),
            path: row.storage_path.clone(),
            captured_at: row.captured_at,
        }
    }
}

/// A listed photo together with its display URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CameraPhotoPreview {
    #[serde(flatten)]
    pub row: PhotoRow,
    pub image_url: Option<String>,
}
