//! Field transform utilities
//!
//! Pure helpers the forms use to turn user input into payload fields:
//! the 12-hour to 24-hour time normalizer and the file-to-base64 image
//! encoder.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveTime;
use foodie_core::{ClientError, ClientResult};

/// Format of the labels the time selects offer, e.g. `"10:00 AM"`
const TIME_LABEL_FORMAT: &str = "%I:%M %p";

/// The selectable operating-hour labels, in chronological order
pub const TIME_SLOTS: &[&str] = &[
    "10:00 AM", "11:00 AM", "12:00 PM", "01:00 PM", "02:00 PM", "03:00 PM", "04:00 PM",
    "05:00 PM", "06:00 PM", "07:00 PM", "08:00 PM", "09:00 PM", "10:00 PM", "11:00 PM",
];

// ============================================================================
// Time normalization
// ============================================================================

/// Normalize a `"hh:mm AM|PM"` label to a zero-padded `"HH:mm"` string.
///
/// The output compares lexicographically the same way the underlying times
/// compare chronologically, so callers can order labels with plain string
/// comparison. Midnight and noon follow the 24-hour convention:
/// `"12:00 AM"` maps to `"00:00"` and `"12:00 PM"` to `"12:00"`.
pub fn convert_to_24_hour(label: &str) -> ClientResult<String> {
    let time = NaiveTime::parse_from_str(label.trim(), TIME_LABEL_FORMAT)
        .map_err(|_| ClientError::InvalidTimeLabel(label.to_string()))?;
    Ok(time.format("%H:%M").to_string())
}

// ============================================================================
// Image encoding
// ============================================================================

/// Read a selected image file and encode its contents as base64.
///
/// Size and MIME-type constraints are the validation engine's job; this
/// only performs the read and the encoding. Resolves once per call.
pub async fn encode_image_file(path: &Path) -> ClientResult<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ClientError::file_read(path, e.to_string()))?;
    Ok(STANDARD.encode(bytes))
}

// ============================================================================
// Tests
// ============================================================================
