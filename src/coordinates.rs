//! NMEA angle conversions
use std::str::FromStr;

/// Converts an NMEA `(d)ddmm.mmmm` angle and its hemisphere letter
/// to signed decimal degrees. `S` and `W` hemispheres are negative.
/// Returns None when either field is empty or cannot be interpreted.
/// ```
/// use nmea_gnss::coordinates::dms_to_decimal;
/// let lat = dms_to_decimal("4807.038", "N").unwrap();
/// assert!((lat - 48.1173).abs() < 1E-4);
///
/// let lon = dms_to_decimal("01131.000", "W").unwrap();
/// assert!((lon + 11.516666).abs() < 1E-6);
///
/// assert!(dms_to_decimal("", "N").is_none());
/// assert!(dms_to_decimal("4807.038", "").is_none());
/// ```
pub fn dms_to_decimal(value: &str, hemisphere: &str) -> Option<f64> {
    let value = value.trim();
    let hemisphere = hemisphere.trim();
    if value.is_empty() || hemisphere.is_empty() {
        return None;
    }

    let value = f64::from_str(value).ok()?;
    if !value.is_finite() {
        return None;
    }

    let degrees = (value / 100.0).trunc();
    let minutes = value - degrees * 100.0;
    let decimal = degrees + minutes / 60.0;

    match hemisphere {
        "N" | "E" | "n" | "e" => Some(decimal),
        "S" | "W" | "s" | "w" => Some(-decimal),
        _ => None,
    }
}
