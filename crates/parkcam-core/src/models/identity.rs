//! Business identity resolved from a decoded identifier.

use serde::Serialize;
use uuid::Uuid;

use super::DecodedIdentifier;

/// Park, camera code and attraction a photo belongs to.
///
/// `attraction_id` is only ever set together with `park_id` and
/// `matched_customer_code`; there is no path-to-attraction shortcut.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedIdentity {
    #[serde(rename = "matchedParkId")]
    pub park_id: Option<Uuid>,
    #[serde(rename = "matchedParkName")]
    pub park_name: Option<String>,
    pub matched_customer_code: Option<String>,
    #[serde(rename = "matchedAttractionId")]
    pub attraction_id: Option<Uuid>,
    #[serde(rename = "matchedAttractionName")]
    pub attraction_name: Option<String>,
}

impl ResolvedIdentity {
    /// True when nothing resolved at all.
    pub fn is_empty(&self) -> bool {
        self.park_id.is_none()
    }
}

/// Decoded fields merged with the resolved identity, as shown by the
/// ingestion-check tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewResult {
    #[serde(flatten)]
    pub decoded: DecodedIdentifier,
    #[serde(flatten)]
    pub identity: ResolvedIdentity,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EncodedCore;

    #[test]
    fn preview_flattens_both_halves() {
        let park_id = Uuid::new_v4();
        let preview = PreviewResult {
            decoded: DecodedIdentifier {
                prefix: Some("plose-plosebob".to_string()),
                filename: "1963186224002020.jpg".to_string(),
                core: EncodedCore::from_digits("1963186224002020"),
                speed_kmh: 0.0,
            },
            identity: ResolvedIdentity {
                park_id: Some(park_id),
                park_name: Some("Plose".to_string()),
                ..Default::default()
            },
        };

        let json = serde_json::to_value(&preview).unwrap();
        assert_eq!(json["prefix"], "plose-plosebob");
        assert_eq!(json["customerCode"], "1234");
        assert_eq!(json["matchedParkId"], park_id.to_string());
        assert_eq!(json["matchedParkName"], "Plose");
        assert_eq!(json["matchedCustomerCode"], serde_json::Value::Null);
        assert_eq!(json["matchedAttractionName"], serde_json::Value::Null);
    }
}
