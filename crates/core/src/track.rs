//! Storm-track observations and the hurdat2-derived storm file format.
//!
//! A storm file is JSON of the shape
//! `{"storms": [{"name": "...", "entries": [[year, month, day, time, event,
//! status, lat, lon, maxwind, minpress], ...]}, ...]}` where `time` is an
//! integer in 24-hour format (0, 600, 1200, 1800). The hurdat2 layout is
//! documented at <https://www.nhc.noaa.gov/data/hurdat/hurdat2-format-atlantic.pdf>.
//!
//! Fields carrying the `-999` missing sentinel are rejected at load time; the
//! engine itself assumes a pre-validated [`Track`].

use crate::error::ModelError;
use crate::geo;
use serde::Deserialize;
use std::path::Path;

/// Missing-value sentinel used by the hurdat2-derived files.
const MISSING: f64 = -999.0;

/// A single storm observation, ordered by simulated hour.
///
/// The simulated hour is day-of-year * 24 + hour-of-day, matching the time
/// base the interpolator brackets against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Simulated hour since the start of the calendar year.
    pub hour: f64,
    /// Longitude in degrees, signed (east positive).
    pub lon: f64,
    /// Latitude in degrees, signed (north positive).
    pub lat: f64,
    /// Storm heading in degrees clockwise from north.
    pub heading_deg: f64,
    /// Forward (translational) speed in knots.
    pub forward_speed_kt: f64,
    /// Central pressure in millibars.
    pub central_pressure_mb: f64,
    /// Maximum sustained wind in knots.
    pub max_wind_kt: f64,
}

/// An ordered, validated sequence of observations for one storm.
#[derive(Debug, Clone)]
pub struct Track {
    name: String,
    obs: Vec<Observation>,
}

impl Track {
    /// Builds a track, enforcing length >= 2 and strictly increasing hours.
    pub fn new(name: impl Into<String>, obs: Vec<Observation>) -> Result<Self, ModelError> {
        if obs.len() < 2 {
            return Err(ModelError::TrackTooShort(obs.len()));
        }
        for (i, pair) in obs.windows(2).enumerate() {
            if pair[1].hour <= pair[0].hour {
                return Err(ModelError::NonMonotonicTrack { index: i + 1 });
            }
        }
        Ok(Self {
            name: name.into(),
            obs,
        })
    }

    /// Storm name (e.g. "KATRINA").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The observations, ordered by hour.
    pub fn observations(&self) -> &[Observation] {
        &self.obs
    }

    /// Simulated hour of the first observation.
    pub fn start_hour(&self) -> f64 {
        self.obs[0].hour
    }

    /// Simulated hour of the last observation.
    pub fn end_hour(&self) -> f64 {
        self.obs[self.obs.len() - 1].hour
    }
}

/// One raw storm-file entry:
/// (year, month, day, time, event, status, lat, lon, maxwind, minpress).
#[derive(Debug, Deserialize)]
struct RawEntry(
    i32,
    u32,
    u32,
    i32,
    #[allow(dead_code)] String,
    #[allow(dead_code)] String,
    f64,
    f64,
    f64,
    f64,
);

#[derive(Debug, Deserialize)]
struct RawStorm {
    name: String,
    entries: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct StormFile {
    storms: Vec<RawStorm>,
}

/// Parses a storm file from JSON text into validated tracks.
///
/// Heading and forward speed are not present in the raw entries; they are
/// derived from the bearing and distance between consecutive fixes, with the
/// last observation reusing the previous pair's values.
pub fn parse_storm_file(json: &str) -> Result<Vec<Track>, ModelError> {
    let file: StormFile =
        serde_json::from_str(json).map_err(|e| ModelError::MalformedStormFile(e.to_string()))?;
    file.storms.into_iter().map(track_from_raw).collect()
}

/// Reads and parses a storm file from disk.
pub fn load_storm_file(path: &Path) -> Result<Vec<Track>, ModelError> {
    let json = std::fs::read_to_string(path)?;
    parse_storm_file(&json)
}

/// Finds a track by name (case-insensitive), or the first track when `name`
/// is `None`.
pub fn select_storm<'a>(
    tracks: &'a [Track],
    name: Option<&str>,
) -> Result<&'a Track, ModelError> {
    match name {
        None => tracks
            .first()
            .ok_or_else(|| ModelError::StormNotFound("<empty file>".into())),
        Some(n) => tracks
            .iter()
            .find(|t| t.name().eq_ignore_ascii_case(n))
            .ok_or_else(|| ModelError::StormNotFound(n.into())),
    }
}

fn track_from_raw(raw: RawStorm) -> Result<Track, ModelError> {
    let mut obs = Vec::with_capacity(raw.entries.len());
    for (index, e) in raw.entries.iter().enumerate() {
        let RawEntry(year, month, day, time, _, _, lat, lon, maxwind, minpress) = *e;
        for (field, value) in [
            ("lat", lat),
            ("lon", lon),
            ("maxwind", maxwind),
            ("minpress", minpress),
            ("time", f64::from(time)),
        ] {
            if value == MISSING {
                return Err(ModelError::MissingValue { field, index });
            }
        }
        let hour = f64::from(day_of_year(year, month, day)) * 24.0 + f64::from(time / 100);
        obs.push(Observation {
            hour,
            lon,
            lat,
            heading_deg: 0.0,
            forward_speed_kt: 0.0,
            central_pressure_mb: minpress,
            max_wind_kt: maxwind,
        });
    }

    derive_motion(&mut obs);
    Track::new(raw.name, obs)
}

/// Fills in heading and forward speed from consecutive fix pairs.
fn derive_motion(obs: &mut [Observation]) {
    let n = obs.len();
    for i in 0..n.saturating_sub(1) {
        let (a, b) = (obs[i], obs[i + 1]);
        let heading = geo::bearing_deg(a.lon, a.lat, b.lon, b.lat);
        let dist_m = geo::distance_m(a.lon, a.lat, b.lon, b.lat);
        let dt_secs = (b.hour - a.hour) * 3600.0;
        let speed_kt = if dt_secs > 0.0 {
            dist_m / dt_secs * 3600.0 / geo::NAUTICAL_MILE_M
        } else {
            0.0
        };
        obs[i].heading_deg = heading;
        obs[i].forward_speed_kt = speed_kt;
    }
    if n >= 2 {
        obs[n - 1].heading_deg = obs[n - 2].heading_deg;
        obs[n - 1].forward_speed_kt = obs[n - 2].forward_speed_kt;
    }
}

/// Day of the year (1-based) for a calendar date, leap-year aware.
fn day_of_year(year: i32, month: u32, day: u32) -> u32 {
    const CUMULATIVE: [u32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    let m = (month.clamp(1, 12) - 1) as usize;
    let mut doy = CUMULATIVE[m] + day;
    if leap && month > 2 {
        doy += 1;
    }
    doy
}
