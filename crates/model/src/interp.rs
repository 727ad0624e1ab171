//! Temporal interpolation of track observations.
//!
//! Given a simulated hour, locates the bracketing observation pair and
//! linearly interpolates the storm's position, motion, and pressure. A
//! simulated hour beyond the last observation is the normal completion
//! condition, reported as `None`.

use windfield_core::geo::lerp;
use windfield_core::track::Track;

/// Interpolated track values at one simulated instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSample {
    pub lon: f64,
    pub lat: f64,
    pub heading_deg: f64,
    pub forward_speed_kt: f64,
    pub central_pressure_mb: f64,
}

/// Samples the track at `hour`, or `None` once the track is exhausted.
///
/// Hours at or before the first observation reproduce it exactly; a
/// zero-length bracket is treated as proportion 0.
pub fn sample_track(track: &Track, hour: f64) -> Option<TrackSample> {
    let obs = track.observations();

    let next_index = obs.iter().position(|o| o.hour >= hour)?;
    if next_index == 0 {
        return Some(sample_of(&obs[0], &obs[0], 0.0));
    }

    let prev = &obs[next_index - 1];
    let next = &obs[next_index];
    let span = next.hour - prev.hour;
    let proportion = if span > 0.0 {
        (hour - prev.hour) / span
    } else {
        0.0
    };
    Some(sample_of(prev, next, proportion))
}

fn sample_of(
    prev: &windfield_core::track::Observation,
    next: &windfield_core::track::Observation,
    t: f64,
) -> TrackSample {
    TrackSample {
        lon: lerp(prev.lon, next.lon, t),
        lat: lerp(prev.lat, next.lat, t),
        heading_deg: lerp(prev.heading_deg, next.heading_deg, t),
        forward_speed_kt: lerp(prev.forward_speed_kt, next.forward_speed_kt, t),
        central_pressure_mb: lerp(prev.central_pressure_mb, next.central_pressure_mb, t),
    }
}
