//! Read-only decode + resolve, as used by the ingestion-check tool.

use parkcam_core::models::PreviewResult;
use parkcam_core::AppError;

use crate::cascade::resolve;
use crate::decode::decode;
use crate::lookup::Lookups;

/// Decode `path` and resolve it, without touching storage or writing rows.
///
/// Ingestion relies on exactly this decode + resolve pair, so a preview of a
/// previously seen path shows what automated ingestion would do with it.
pub async fn preview(path: &str, lookups: Lookups<'_>) -> Result<PreviewResult, AppError> {
    let decoded = decode(path);
    let identity = resolve(&decoded, lookups).await?;
    Ok(PreviewResult { decoded, identity })
}
