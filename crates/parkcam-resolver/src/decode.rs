//! Storage-path decoder.
//!
//! Camera hardware names uploads without any knowledge of parks or attractions.
//! Four firmware generations coexist in the same buckets:
//!
//! ```text
//! plose-plosebob/1963186224002020.jpg          16-digit encoded core
//! plose-plosebob/19631862240020200150.jpg      core + 4 trailing speed digits
//! plose-plosebob/1963186224002020_S0150.jpg    core + explicit speed suffix
//! plose-plosebob/Run 12,5 km/h.jpg             free-text speed only
//! ```
//!
//! [`decode`] accepts all of them without configuration and never fails: an
//! unrecognised shape simply leaves the codes absent and the speed at zero.

use std::sync::LazyLock;

use parkcam_core::models::{DecodedIdentifier, EncodedCore, ENCODED_CORE_LEN};
use regex::Regex;

/// Stem length when the core is followed by four speed digits.
const CORE_WITH_SPEED_LEN: usize = ENCODED_CORE_LEN + 4;

static KMH_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]{1,3}[,.][0-9]{1,2})\s*km/h").expect("km/h pattern is valid")
});

/// Where the speed of a ride photo was read from.
///
/// The sources are mutually exclusive; [`SpeedSource::select`] applies the
/// priority order suffix, trailing digits, free text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedSource {
    /// `_S####` / `-S####` suffix, hundredths of km/h.
    Suffix(u16),
    /// Four digits after a 16-digit core, hundredths of km/h.
    TrailingDigits(u16),
    /// Human readable `12,5 km/h` text anywhere in the path.
    KmhText(f64),
    None,
}

impl SpeedSource {
    pub fn select(suffix: Option<u16>, trailing: Option<u16>, path: &str) -> Self {
        suffix
            .map(SpeedSource::Suffix)
            .or_else(|| trailing.map(SpeedSource::TrailingDigits))
            .or_else(|| scan_kmh_text(path).map(SpeedSource::KmhText))
            .unwrap_or(SpeedSource::None)
    }

    pub fn kmh(&self) -> f64 {
        match *self {
            SpeedSource::Suffix(raw) | SpeedSource::TrailingDigits(raw) => f64::from(raw) / 100.0,
            SpeedSource::KmhText(kmh) => kmh,
            SpeedSource::None => 0.0,
        }
    }
}

/// Decode a raw storage path.
pub fn decode(path: &str) -> DecodedIdentifier {
    decode_with_speed_source(path).0
}

/// Decode a raw storage path and report which speed source was used.
pub fn decode_with_speed_source(path: &str) -> (DecodedIdentifier, SpeedSource) {
    let trimmed = path.trim();

    let (prefix, filename) = match trimmed.split_once('/') {
        Some((prefix, rest)) => (Some(prefix.to_string()), rest.to_string()),
        None => (None, trimmed.to_string()),
    };

    let stem = strip_extension(&filename);
    let (base_stem, suffix_speed) = split_speed_suffix(stem);

    let (core, trailing_speed) = if base_stem.bytes().all(|b| b.is_ascii_digit()) {
        match base_stem.len() {
            ENCODED_CORE_LEN => (EncodedCore::from_digits(base_stem), None),
            CORE_WITH_SPEED_LEN => (
                EncodedCore::from_digits(&base_stem[..ENCODED_CORE_LEN]),
                base_stem[ENCODED_CORE_LEN..].parse().ok(),
            ),
            _ => (None, None),
        }
    } else {
        (None, None)
    };

    let speed = SpeedSource::select(suffix_speed, trailing_speed, trimmed);

    let decoded = DecodedIdentifier {
        prefix,
        filename,
        core,
        speed_kmh: speed.kmh(),
    };
    (decoded, speed)
}

/// Remove a final `.ext` (at least one non-dot character after the dot).
fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(dot) if dot + 1 < filename.len() => &filename[..dot],
        _ => filename,
    }
}

/// Split a trailing `_S####` / `-S####` speed tag off the stem.
fn split_speed_suffix(stem: &str) -> (&str, Option<u16>) {
    let bytes = stem.as_bytes();
    let len = bytes.len();
    if len < 6 {
        return (stem, None);
    }

    let sep = bytes[len - 6];
    let tag = bytes[len - 5];
    let digits = &bytes[len - 4..];
    if (sep == b'_' || sep == b'-')
        && tag.eq_ignore_ascii_case(&b's')
        && digits.iter().all(u8::is_ascii_digit)
    {
        let raw = stem[len - 4..].parse().ok();
        return (&stem[..len - 6], raw);
    }

    (stem, None)
}

fn scan_kmh_text(path: &str) -> Option<f64> {
    let captures = KMH_TEXT.captures(path)?;
    captures[1].replace(',', ".").parse().ok()
}
