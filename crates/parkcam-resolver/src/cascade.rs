//! Resolution cascade: decoded identifier → park, camera code, attraction.
//!
//! Stages run strictly in order (prefix, then camera, then attraction name)
//! because each one needs the previous result. There is no transaction across
//! the stages; a prefix remapped between two stages is accepted as a rare race.

use parkcam_core::models::{DecodedIdentifier, ResolvedIdentity};
use parkcam_core::AppError;
use uuid::Uuid;

use crate::lookup::Lookups;
use crate::strategy::first_success;

/// Customer codes to try for a camera match, modern code first.
///
/// Newer firmware reuses the first four digits for an unrelated value, so the
/// interleaved code is tried before the legacy one. Duplicates are dropped.
pub fn candidate_codes(decoded: &DecodedIdentifier) -> Vec<&str> {
    let mut candidates: Vec<&str> = Vec::with_capacity(2);
    for code in [decoded.customer_code(), decoded.legacy_customer_code()]
        .into_iter()
        .flatten()
    {
        if !candidates.contains(&code) {
            candidates.push(code);
        }
    }
    candidates
}

/// Resolve a decoded identifier against the lookup tables.
///
/// Misses at any stage leave the remaining fields absent. Store failures are
/// returned as errors and never reported as a miss.
#[tracing::instrument(skip(decoded, lookups), fields(prefix = ?decoded.prefix))]
pub async fn resolve(
    decoded: &DecodedIdentifier,
    lookups: Lookups<'_>,
) -> Result<ResolvedIdentity, AppError> {
    let mut identity = ResolvedIdentity::default();

    let Some(prefix) = decoded.prefix.as_deref().filter(|p| !p.is_empty()) else {
        tracing::debug!("No path prefix, nothing to resolve");
        return Ok(identity);
    };

    let Some(park) = lookups.prefixes.find_active_prefix(prefix).await? else {
        tracing::debug!(prefix = %prefix, "No active park for prefix");
        return Ok(identity);
    };
    identity.park_id = Some(park.park_id);
    identity.park_name = park.park_name;

    let park_id = park.park_id;
    let matched: Option<(&str, Uuid)> =
        first_success(candidate_codes(decoded), |code| async move {
            let camera = lookups.cameras.find_active_camera(park_id, code).await?;
            // A camera without an attraction is not a match; keep looking.
            Ok::<_, AppError>(camera.and_then(|c| c.attraction_id).map(|id| (code, id)))
        })
        .await?;

    let Some((code, attraction_id)) = matched else {
        tracing::debug!(park_id = %park_id, "No camera with an attraction for any candidate code");
        return Ok(identity);
    };
    identity.matched_customer_code = Some(code.to_string());
    identity.attraction_id = Some(attraction_id);
    identity.attraction_name = lookups
        .attractions
        .find_attraction_name(attraction_id)
        .await?;

    tracing::debug!(
        park_id = %park_id,
        customer_code = %code,
        attraction_id = %attraction_id,
        "Resolved attraction"
    );

    Ok(identity)
}
