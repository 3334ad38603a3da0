//! Decoded storage-path identifier.
//!
//! The camera firmware packs a 16-digit payload (the encoded core) into the
//! filename stem. The four codes derived from it are stored together in one
//! [`EncodedCore`], so a decoded identifier either has all of them or none.

use serde::ser::{Serialize, Serializer};

/// Length of the encoded core in digits.
pub const ENCODED_CORE_LEN: usize = 16;

/// Positions of the core digits that form the customer code, in output order.
///
/// Matches observed camera firmware output. Load-bearing; do not reorder.
pub const CUSTOMER_CODE_POSITIONS: [usize; 4] = [0, 8, 3, 9];

/// The codes carried by one 16-digit encoded core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCore {
    digits: String,
    customer_code: String,
}

impl EncodedCore {
    /// Derive the codes from exactly 16 ASCII digits. Anything else yields `None`.
    pub fn from_digits(digits: &str) -> Option<Self> {
        if digits.len() != ENCODED_CORE_LEN || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let bytes = digits.as_bytes();
        let customer_code = CUSTOMER_CODE_POSITIONS
            .iter()
            .map(|&i| bytes[i] as char)
            .collect();

        Some(Self {
            digits: digits.to_string(),
            customer_code,
        })
    }

    /// The full 16-digit payload.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Modern camera/customer code: digits 0, 8, 3, 9.
    pub fn customer_code(&self) -> &str {
        &self.customer_code
    }

    /// Old-encoding camera/customer code: digits [0, 4).
    pub fn legacy_customer_code(&self) -> &str {
        &self.digits[0..4]
    }

    /// Capture time code: digits [4, 12).
    pub fn time_code(&self) -> &str {
        &self.digits[4..12]
    }

    /// Per-capture sequence code: digits [12, 16).
    pub fn file_code(&self) -> &str {
        &self.digits[12..16]
    }
}

/// Everything the decoder can read out of a storage path.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedIdentifier {
    pub prefix: Option<String>,
    pub filename: String,
    pub core: Option<EncodedCore>,
    pub speed_kmh: f64,
}

impl DecodedIdentifier {
    pub fn customer_code(&self) -> Option<&str> {
        self.core.as_ref().map(EncodedCore::customer_code)
    }

    pub fn legacy_customer_code(&self) -> Option<&str> {
        self.core.as_ref().map(EncodedCore::legacy_customer_code)
    }

    pub fn time_code(&self) -> Option<&str> {
        self.core.as_ref().map(EncodedCore::time_code)
    }

    pub fn file_code(&self) -> Option<&str> {
        self.core.as_ref().map(EncodedCore::file_code)
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct DecodedIdentifierWire<'a> {
    prefix: Option<&'a str>,
    filename: &'a str,
    customer_code: Option<&'a str>,
    legacy_customer_code: Option<&'a str>,
    time_code: Option<&'a str>,
    file_code: Option<&'a str>,
    speed_kmh: f64,
}

impl Serialize for DecodedIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        DecodedIdentifierWire {
            prefix: self.prefix.as_deref(),
            filename: &self.filename,
            customer_code: self.customer_code(),
            legacy_customer_code: self.legacy_customer_code(),
            time_code: self.time_code(),
            file_code: self.file_code(),
            speed_kmh: self.speed_kmh,
        }
        .serialize(serializer)
    }
}
