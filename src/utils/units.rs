//! Unit conversions applied to point forecasts.

/// Convert metres per second to whole kilometres per hour, truncating toward zero.
pub fn mps_to_kmh(mps: f64) -> i64 {
    let km_per_second = mps / 1000.0;
    (km_per_second * 60.0 * 60.0).trunc() as i64
}

/// Drop the fractional part of a reading.
pub fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

/// Six-bucket description of a visibility in metres.
pub fn visibility_text(metres: u32) -> &'static str {
    let km = f64::from(metres) / 1000.0;

    if km < 1.0 {
        "Very poor"
    } else if km < 4.0 {
        "Poor"
    } else if km < 10.0 {
        "Moderate"
    } else if km < 20.0 {
        "Good"
    } else if km < 40.0 {
        "Very Good"
    } else {
        "Excellent"
    }
}
