//! Fixed-width ASCII sub-field conversions.
//!
//! Sentences carry their values as runs of ASCII characters with no
//! delimiters. A run holding anything other than an optionally signed decimal
//! integer (padding aside) is a placeholder, and resolves to a default rather
//! than failing the sentence.

use core::fmt;

/// Parse a sub-field as a signed decimal integer.
///
/// Surrounding ASCII whitespace and a leading `+` or `-` are accepted. Returns
/// `None` for placeholders such as `____` or blank runs.
pub fn number(r: &[u8]) -> Option<i32> {
    core::str::from_utf8(r).ok()?.trim().parse().ok()
}

/// Parse a sub-field and multiply by a scale factor, if valid.
pub fn scaled(r: &[u8], factor: f64) -> Option<f64> {
    number(r).map(|x| f64::from(x) * factor)
}

/// Parse a sub-field, substituting zero for placeholders.
pub fn number_or_zero(r: &[u8]) -> i32 {
    number(r).unwrap_or(0)
}

/// Parse and scale a sub-field, substituting zero for placeholders.
pub fn scaled_or_zero(r: &[u8], factor: f64) -> f64 {
    scaled(r, factor).unwrap_or(0.0)
}

/// Convert a sub-field in degrees Celsius (in units of `1 / divisor`) to
/// Fahrenheit.
///
/// Placeholders yield zero, not the Fahrenheit offset.
pub fn fahrenheit(r: &[u8], divisor: f64) -> f64 {
    number(r).map_or(0.0, |x| f64::from(x) * 9.0 / (5.0 * divisor) + 32.0)
}

/// A single-character sub-field (hemisphere or direction marker).
pub fn marker(r: [u8; 1]) -> char {
    char::from(r[0])
}

/// A UTC time of day, as carried at the head of each sentence.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl TimeOfDay {
    /// Decode hour, minute, and second sub-fields.
    ///
    /// Placeholder or out-of-range components read as zero.
    pub fn from_fields(hour: [u8; 2], minute: [u8; 2], second: [u8; 2]) -> Self {
        let component = |r: [u8; 2]| number(&r).and_then(|x| u8::try_from(x).ok()).unwrap_or(0);

        Self {
            hour: component(hour),
            minute: component(minute),
            second: component(second),
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}
