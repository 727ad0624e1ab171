//! Mutable simulation state in SI units, including the Holland profile
//! parameters and the over-land decay step.

use crate::interp::TrackSample;
use windfield_core::config::ModelConfig;
use windfield_core::geo::knots_to_mps;
use windfield_core::track::Observation;

/// Constant in the storm-motion asymmetry term (m/s).
const ASYMMETRY_T0: f64 = 0.514791;

/// Current simulation state. Pressures are in Pascals, distances in meters,
/// speeds in m/s, angles in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelState {
    /// Current simulated hour.
    pub hour: f64,
    /// Eye position in degrees.
    pub eye_lon: f64,
    pub eye_lat: f64,
    /// Storm track azimuth, radians clockwise from north.
    pub azimuth_rad: f64,
    /// Translational (forward) speed, m/s.
    pub translational_speed: f64,
    /// Central and peripheral pressure, Pa.
    pub central_pressure: f64,
    pub peripheral_pressure: f64,
    /// Pressure deficit (peripheral - central), floored at zero.
    pub delta_pressure: f64,
    /// Radius to maximum wind, m.
    pub rmax: f64,
    /// Holland profile parameters.
    pub a_holland: f64,
    pub b_holland: f64,
    /// +1 north of the equator, -1 south.
    pub hemisphere_sign: f64,
    /// Surface inflow angle, radians.
    pub inflow: f64,
    /// Storm-motion asymmetry term, m/s.
    pub asymmetry: f64,
    /// Whether the eye is currently over land.
    pub on_land: bool,
    /// Highest grid speed recorded while over land, m/s.
    pub max_land_speed: f64,
    // Constants captured from configuration.
    pub coriolis: f64,
    pub air_density: f64,
    rmax_min: f64,
    rmax_max: f64,
}

impl ModelState {
    /// Derives the initial state from the configuration and the track's
    /// first observation.
    pub fn new(config: &ModelConfig, first: &Observation) -> Self {
        let peripheral_pressure = config.peripheral_pressure_mb * 100.0;
        let rmax_min = config.rmax_min_km * 1000.0;
        let rmax_max = config.rmax_max_km * 1000.0;
        let mut state = Self {
            hour: first.hour,
            eye_lon: first.lon,
            eye_lat: first.lat,
            azimuth_rad: first.heading_deg.to_radians(),
            translational_speed: knots_to_mps(first.forward_speed_kt),
            central_pressure: first.central_pressure_mb * 100.0,
            peripheral_pressure,
            delta_pressure: 0.0,
            rmax: (config.initial_rmax_km * 1000.0).clamp(rmax_min, rmax_max),
            a_holland: 0.0,
            b_holland: 0.0,
            hemisphere_sign: if first.lat < 0.0 { -1.0 } else { 1.0 },
            inflow: config.inflow_angle_deg.to_radians(),
            asymmetry: 0.0,
            on_land: false,
            max_land_speed: 0.0,
            coriolis: config.coriolis,
            air_density: config.air_density,
            rmax_min,
            rmax_max,
        };
        state.recompute_derived();
        state
    }

    /// Applies an interpolated track sample: eye position, azimuth, forward
    /// speed, and (while at sea) central pressure.
    ///
    /// Once over land the filling process owns the central pressure, so the
    /// track's interpolated pressure is ignored until the flag clears.
    pub fn apply_track_sample(&mut self, sample: &TrackSample) {
        self.eye_lon = sample.lon;
        self.eye_lat = sample.lat;
        self.azimuth_rad = sample.heading_deg.to_radians();
        self.translational_speed = knots_to_mps(sample.forward_speed_kt);
        if !self.on_land {
            self.central_pressure = sample.central_pressure_mb * 100.0;
        }
        self.recompute_derived();
    }

    /// One land-transition step: the center fills toward peripheral pressure
    /// and RMAX grows, both clamped; the Holland parameters are re-derived so
    /// the same step's wind field reflects the update.
    pub fn land_transition(&mut self, config: &ModelConfig, dt_secs: f64) {
        if !self.on_land {
            return;
        }
        let filling_pa_per_sec = config.filling_rate_mb_hr / 36.0;
        let growth_m_per_sec = config.rmax_growth_km_hr / 3.6;
        self.central_pressure =
            (self.central_pressure + filling_pa_per_sec * dt_secs).min(self.peripheral_pressure);
        self.rmax = (self.rmax + growth_m_per_sec * dt_secs).clamp(self.rmax_min, self.rmax_max);
        self.recompute_derived();
    }

    /// Re-derives the pressure deficit, Holland A/B, and the asymmetry term.
    fn recompute_derived(&mut self) {
        self.delta_pressure = (self.peripheral_pressure - self.central_pressure).max(0.0);
        self.b_holland = 1.5 + (980.0 - self.central_pressure / 100.0) / 120.0;
        self.a_holland = (self.rmax / 1000.0).powf(self.b_holland);
        self.asymmetry = if self.translational_speed > 0.0 {
            1.5 * self.translational_speed.powf(0.63) * ASYMMETRY_T0.powf(0.37)
        } else {
            0.0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use windfield_core::config::ModelConfig;

    fn obs() -> Observation {
        Observation {
            hour: 0.0,
            lon: -75.0,
            lat: 25.0,
            heading_deg: 270.0,
            forward_speed_kt: 10.0,
            central_pressure_mb: 950.0,
            max_wind_kt: 100.0,
        }
    }

    fn state() -> ModelState {
        ModelState::new(&ModelConfig::default(), &obs())
    }

    #[test]
    fn new_converts_to_si_units() {
        let s = state();
        assert!((s.central_pressure - 95_000.0).abs() < 1e-9);
        assert!((s.peripheral_pressure - 101_300.0).abs() < 1e-9);
        assert!((s.delta_pressure - 6_300.0).abs() < 1e-9);
        assert!((s.rmax - 50_000.0).abs() < 1e-9);
        assert!((s.translational_speed - knots_to_mps(10.0)).abs() < 1e-12);
    }

    #[test]
    fn holland_parameters_match_formula() {
        let s = state();
        // B = 1.5 + (980 - 950) / 120 = 1.75; A = 50^1.75
        assert!((s.b_holland - 1.75).abs() < 1e-12);
        assert!((s.a_holland - 50.0_f64.powf(1.75)).abs() < 1e-9);
    }

    #[test]
    fn hemisphere_sign_follows_latitude() {
        let north = state();
        assert_eq!(north.hemisphere_sign, 1.0);

        let mut southern = obs();
        southern.lat = -15.0;
        let south = ModelState::new(&ModelConfig::default(), &southern);
        assert_eq!(south.hemisphere_sign, -1.0);
    }

    #[test]
    fn asymmetry_term_matches_formula() {
        let s = state();
        let v = knots_to_mps(10.0);
        let expected = 1.5 * v.powf(0.63) * 0.514791_f64.powf(0.37);
        assert!((s.asymmetry - expected).abs() < 1e-12);
    }

    #[test]
    fn asymmetry_is_zero_for_stationary_storm() {
        let mut stationary = obs();
        stationary.forward_speed_kt = 0.0;
        let s = ModelState::new(&ModelConfig::default(), &stationary);
        assert_eq!(s.asymmetry, 0.0);
    }

    #[test]
    fn apply_track_sample_updates_motion_and_pressure() {
        let mut s = state();
        s.apply_track_sample(&TrackSample {
            lon: -76.0,
            lat: 25.5,
            heading_deg: 280.0,
            forward_speed_kt: 12.0,
            central_pressure_mb: 940.0,
        });
        assert_eq!(s.eye_lon, -76.0);
        assert!((s.central_pressure - 94_000.0).abs() < 1e-9);
        assert!((s.delta_pressure - 7_300.0).abs() < 1e-9);
        // B re-derived from the new pressure
        assert!((s.b_holland - (1.5 + 40.0 / 120.0)).abs() < 1e-12);
    }

    #[test]
    fn on_land_track_pressure_is_ignored() {
        let mut s = state();
        s.on_land = true;
        let before = s.central_pressure;
        s.apply_track_sample(&TrackSample {
            lon: -76.0,
            lat: 25.5,
            heading_deg: 280.0,
            forward_speed_kt: 12.0,
            central_pressure_mb: 900.0,
        });
        assert_eq!(s.central_pressure, before);
    }

    #[test]
    fn delta_pressure_floors_at_zero() {
        let mut weak = obs();
        weak.central_pressure_mb = 1020.0; // above peripheral
        let s = ModelState::new(&ModelConfig::default(), &weak);
        assert_eq!(s.delta_pressure, 0.0);
    }

    #[test]
    fn land_transition_fills_and_grows() {
        let config = ModelConfig {
            filling_rate_mb_hr: 2.0,
            rmax_growth_km_hr: 3.6,
            ..ModelConfig::default()
        };
        let mut s = ModelState::new(&config, &obs());
        s.on_land = true;
        let p0 = s.central_pressure;
        let r0 = s.rmax;
        s.land_transition(&config, 3600.0);
        // 2 mb/hr over one hour = 200 Pa; 3.6 km/hr over one hour = 3600 m
        assert!((s.central_pressure - (p0 + 200.0)).abs() < 1e-9);
        assert!((s.rmax - (r0 + 3600.0)).abs() < 1e-9);
    }

    #[test]
    fn land_transition_clamps_at_peripheral_pressure() {
        let config = ModelConfig {
            filling_rate_mb_hr: 1000.0,
            ..ModelConfig::default()
        };
        let mut s = ModelState::new(&config, &obs());
        s.on_land = true;
        s.land_transition(&config, 3600.0 * 24.0);
        assert_eq!(s.central_pressure, s.peripheral_pressure);
        assert_eq!(s.delta_pressure, 0.0);
    }

    #[test]
    fn land_transition_clamps_rmax_at_max() {
        let config = ModelConfig {
            rmax_growth_km_hr: 1000.0,
            ..ModelConfig::default()
        };
        let mut s = ModelState::new(&config, &obs());
        s.on_land = true;
        s.land_transition(&config, 3600.0 * 24.0);
        assert!((s.rmax - config.rmax_max_km * 1000.0).abs() < 1e-9);
    }

    #[test]
    fn land_transition_is_inert_at_sea() {
        let config = ModelConfig {
            filling_rate_mb_hr: 5.0,
            rmax_growth_km_hr: 5.0,
            ..ModelConfig::default()
        };
        let mut s = ModelState::new(&config, &obs());
        let before = s.clone();
        s.land_transition(&config, 3600.0);
        assert_eq!(s, before);
    }

    #[test]
    fn initial_rmax_is_clamped_into_bounds() {
        let config = ModelConfig {
            initial_rmax_km: 500.0,
            ..ModelConfig::default()
        };
        let s = ModelState::new(&config, &obs());
        assert!((s.rmax - config.rmax_max_km * 1000.0).abs() < 1e-9);
    }
}
