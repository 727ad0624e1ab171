//! Geodesy and unit-conversion helpers shared by the engine and CLI.
//!
//! Distances are handled on a local tangent plane: lat/lon offsets from an
//! origin are converted to meters with an equirectangular approximation,
//! which is accurate to well under a percent at the few-hundred-kilometre
//! scale of a storm's influence radius.
//!
//! Azimuths are geodetic throughout: degrees clockwise from north, so the
//! eastward velocity component is `v * sin(azi)` and the northward component
//! is `v * cos(azi)`.

use glam::DVec2;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6.371e6;

/// Meters per degree of latitude (and of longitude at the equator).
pub const METERS_PER_DEG: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

/// One nautical mile in meters.
pub const NAUTICAL_MILE_M: f64 = 1852.0;

/// Converts knots to meters per second.
pub fn knots_to_mps(knots: f64) -> f64 {
    knots * NAUTICAL_MILE_M / 3600.0
}

/// Linear interpolation between `a` and `b` by `t`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Wraps an angle in degrees to [0, 360).
pub fn wrap_deg(angle: f64) -> f64 {
    let a = angle % 360.0;
    if a < 0.0 {
        a + 360.0
    } else {
        a
    }
}

/// Offset in meters of `(lon, lat)` relative to `(origin_lon, origin_lat)`.
///
/// x is east, y is north. Longitude spacing is scaled by the cosine of the
/// origin latitude.
pub fn local_offset_m(lon: f64, lat: f64, origin_lon: f64, origin_lat: f64) -> DVec2 {
    let cos_lat = origin_lat.to_radians().cos();
    DVec2::new(
        (lon - origin_lon) * METERS_PER_DEG * cos_lat,
        (lat - origin_lat) * METERS_PER_DEG,
    )
}

/// Resolves a scalar speed along a geodetic azimuth (radians, clockwise from
/// north) into (east, north) components.
pub fn velocity_from_azimuth(speed: f64, azimuth_rad: f64) -> DVec2 {
    DVec2::new(speed * azimuth_rad.sin(), speed * azimuth_rad.cos())
}

/// Geodetic bearing in degrees from one fix to another, wrapped to [0, 360).
pub fn bearing_deg(from_lon: f64, from_lat: f64, to_lon: f64, to_lat: f64) -> f64 {
    let d = local_offset_m(to_lon, to_lat, from_lon, from_lat);
    wrap_deg(d.x.atan2(d.y).to_degrees())
}

/// Distance in meters between two fixes on the local tangent plane.
pub fn distance_m(from_lon: f64, from_lat: f64, to_lon: f64, to_lat: f64) -> f64 {
    local_offset_m(to_lon, to_lat, from_lon, from_lat).length()
}
