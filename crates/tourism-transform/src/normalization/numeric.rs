//! Numeric conversion for metric fields.
//!
//! Metric values are 8-byte IEEE floating point (`f64`). Thousands separators
//! are not stripped: the comma is the source delimiter, so a comma inside a
//! numeric cell is never a grouping mark.

/// Parse a string value to numeric (f64).
///
/// Handles:
/// - Standard numbers: "123", "-45.67", "+3"
/// - Whitespace: "  123  "
/// - Scientific notation: "1.23e5"
/// - Infinities: "inf", "-Infinity"
///
/// Returns None for empty, unparsable, or NaN values.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return None;
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|parsed| !parsed.is_nan())
}

/// Convert a string to numeric, returning the original value on failure.
///
/// Used for mandatory fields, where the raw value goes into the error.
pub fn transform_to_numeric(value: &str) -> Result<f64, &str> {
    parse_numeric(value).ok_or(value)
}

/// Check if a string represents a valid numeric value.
pub fn is_numeric(value: &str) -> bool {
    parse_numeric(value).is_some()
}
