//! Currency unit conversion
//!
//! Prices are stored as integer cents. Callers speak in major units.

/// Convert a major-unit amount (e.g. dollars) to cents, rounding to nearest.
pub fn to_cents(major: f64) -> i64 {
    (major * 100.0).round() as i64
}
