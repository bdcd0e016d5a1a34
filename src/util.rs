use std::fmt;

/// Converts an angle in degrees to radians.
#[must_use]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Converts an angle in radians to degrees.
#[must_use]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// Computes the prime-vertical radius of curvature `N = a / sqrt(1 - e2 sin²(lat))`.
///
/// `lat` is in radians, `a` in meters, and `e2` is the first eccentricity squared.
///
/// <https://en.wikipedia.org/wiki/Earth_radius#Prime_vertical>
#[doc(alias = "N")]
#[must_use]
pub fn prime_vertical_radius(a: f64, e2: f64, lat: f64) -> f64 {
    let sin_lat = lat.sin();
    a / (1.0 - e2 * sin_lat * sin_lat).sqrt()
}

/// Writes generic position values as `[v1, v2, v3]` with six decimals.
pub(crate) fn write_values(f: &mut fmt::Formatter<'_>, values: &[f64]) -> fmt::Result {
    f.write_str("[")?;
    for (i, v) in values.iter().enumerate() {
        if i != 0 {
            f.write_str(", ")?;
        }
        write!(f, "{v:.6}")?;
    }
    f.write_str("]")
}
