//! Read-only rows owned by the backing store.
//!
//! The core never mutates these; administrators maintain them elsewhere. An
//! inactive row is treated exactly like a missing one.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Park {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub is_active: bool,
}

/// Storage path prefix routed to a park. `path_prefix` is globally unique.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PathPrefix {
    pub id: Uuid,
    pub park_id: Uuid,
    pub path_prefix: String,
    pub is_active: bool,
}

/// A physical camera. `(park_id, customer_code)` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Camera {
    pub id: Uuid,
    pub park_id: Uuid,
    pub customer_code: String,
    pub camera_name: Option<String>,
    pub attraction_id: Option<Uuid>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Attraction {
    pub id: Uuid,
    pub park_id: Uuid,
    pub slug: String,
    pub name: String,
    pub is_active: bool,
}

/// Result of an active-prefix lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ParkMatch {
    pub park_id: Uuid,
    pub park_name: Option<String>,
}

/// Result of an active-camera lookup. The attraction may still be unassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CameraMatch {
    pub attraction_id: Option<Uuid>,
}
