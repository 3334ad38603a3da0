//! Recent photos of one camera, with display URLs.

use parkcam_core::models::{CameraPhotoPreview, PhotoReference, PhotoRow};
use parkcam_core::AppError;
use parkcam_storage::{materialize_with_ttl, UrlSigner};
use std::time::Duration;
use uuid::Uuid;

use crate::lookup::{PhotoSource, PHOTO_QUERY_STRATEGIES};
use crate::strategy::first_ok;

/// List the newest photos stored under a camera code.
///
/// Query strategies are tried in [`PHOTO_QUERY_STRATEGIES`] order; the first
/// one that executes wins even if it finds nothing. If none executes, the last
/// error is returned.
#[tracing::instrument(skip(source))]
pub async fn list_camera_photos(
    source: &dyn PhotoSource,
    park_id: Uuid,
    camera_code: &str,
    limit: i64,
) -> Result<Vec<PhotoRow>, AppError> {
    let rows = first_ok(PHOTO_QUERY_STRATEGIES.iter(), |strategy| async move {
        let result = source
            .query_photos(strategy, park_id, camera_code, limit)
            .await;
        if let Err(ref e) = result {
            tracing::debug!(
                column = strategy.code_column.as_str(),
                scope_to_park = strategy.scope_to_park,
                error = %e,
                "Photo query strategy failed, trying next"
            );
        }
        result
    })
    .await?;

    Ok(rows.unwrap_or_default())
}

/// List a camera's newest photos and attach display URLs.
pub async fn recent_camera_photos(
    source: &dyn PhotoSource,
    signer: &dyn UrlSigner,
    park_id: Uuid,
    camera_code: &str,
    limit: i64,
    ttl: Duration,
) -> Result<Vec<CameraPhotoPreview>, AppError> {
    let rows = list_camera_photos(source, park_id, camera_code, limit).await?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let refs: Vec<PhotoReference> = rows.iter().map(PhotoReference::from).collect();
    let urls = materialize_with_ttl(&refs, signer, ttl).await;

    Ok(rows
        .into_iter()
        .zip(urls)
        .map(|(row, display)| CameraPhotoPreview {
            row,
            image_url: display.url,
        })
        .collect())
}
