//! Simulation engine: phase machine, fixed-timestep clock, and the
//! per-step pipeline.
//!
//! A step interpolates the track, applies the land transition, evaluates the
//! wind field at every polar sample, and accumulates the samples onto the
//! grid. The clock decouples variable tick intervals from the fixed physics
//! step with an accumulator: each `tick` banks (capped) elapsed time, runs as
//! many whole steps as the bank covers, then invokes the render callback
//! exactly once.

use crate::accumulate::accumulate;
use crate::interp::sample_track;
use crate::sampler::{SampleField, SampleGrid};
use crate::state::ModelState;
use crate::wind;
use windfield_core::config::ModelConfig;
use windfield_core::error::ModelError;
use windfield_core::grid::{GridRect, WindGrid};
use windfield_core::track::Track;

/// Engine lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Built but no step has run yet.
    Idle,
    /// At least one step has run and the track is not exhausted.
    Running,
    /// The track is exhausted; further stepping is a no-op.
    Complete,
}

/// Outcome of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Stepped,
    Complete,
}

/// Read-only view of the engine handed to the render callback.
///
/// The references borrow the engine for the duration of the callback only;
/// callers copy out whatever they need to keep.
#[derive(Debug)]
pub struct RenderFrame<'a> {
    /// Current eye position in degrees.
    pub eye_lon: f64,
    pub eye_lat: f64,
    /// Grid rectangle touched by the most recent step, if any step has run.
    pub rect: Option<GridRect>,
    pub grid: &'a WindGrid,
    pub samples: &'a SampleField,
}

/// The storm simulation engine.
pub struct StormEngine {
    config: ModelConfig,
    track: Track,
    pattern: SampleGrid,
    field: SampleField,
    grid: WindGrid,
    state: ModelState,
    phase: Phase,
    step_count: u64,
    accumulator: f64,
    last_rect: Option<GridRect>,
}

impl StormEngine {
    /// Builds an engine from a validated configuration and a track.
    pub fn new(config: ModelConfig, track: Track) -> Result<Self, ModelError> {
        config.validate()?;
        let pattern = SampleGrid::new(
            config.n_radial_samples,
            config.n_angular_samples,
            config.influence_radius_km,
        )?;
        let field = SampleField::new(&pattern);
        let grid = WindGrid::new(config.grid_step_deg)?;
        let state = ModelState::new(&config, &track.observations()[0]);
        Ok(Self {
            config,
            track,
            pattern,
            field,
            grid,
            state,
            phase: Phase::Idle,
            step_count: 0,
            accumulator: 0.0,
            last_rect: None,
        })
    }

    /// Runs one fixed physics step.
    ///
    /// Stepping past the end of the track flips the phase to `Complete`;
    /// stepping a complete engine is a no-op.
    pub fn step(&mut self) -> StepStatus {
        if self.phase == Phase::Complete {
            return StepStatus::Complete;
        }

        let step_hours = self.config.step_size_secs / 3600.0;
        let hour = self.track.start_hour() + self.step_count as f64 * step_hours;
        let Some(sample) = sample_track(&self.track, hour) else {
            self.phase = Phase::Complete;
            return StepStatus::Complete;
        };
        self.phase = Phase::Running;

        self.state.hour = hour;
        self.state.apply_track_sample(&sample);
        self.state.land_transition(&self.config, self.config.step_size_secs);

        for angular in 0..self.pattern.n_angular() {
            let angle = self.pattern.angle_deg(angular);
            for radial in 0..self.pattern.n_radial() {
                let value = wind::sample_value(
                    &self.state,
                    self.config.model,
                    self.pattern.distance_m(radial),
                    angle,
                );
                self.field.set(angular, radial, value);
            }
        }

        self.last_rect = Some(accumulate(
            &mut self.grid,
            &self.pattern,
            &self.field,
            &mut self.state,
            self.config.influence_radius_km,
        ));

        self.step_count += 1;
        StepStatus::Stepped
    }

    /// Advances the clock by `elapsed_secs` of wall time and renders once.
    ///
    /// Elapsed time is clamped to `[0, max_tick_secs]` so a stalled caller
    /// cannot trigger a catch-up stampede of steps. The callback fires
    /// exactly once per tick whether or not any step ran.
    pub fn tick<F>(&mut self, elapsed_secs: f64, render: F) -> Phase
    where
        F: FnOnce(&RenderFrame<'_>),
    {
        self.accumulator += elapsed_secs.clamp(0.0, self.config.max_tick_secs);
        while self.accumulator >= self.config.step_size_secs {
            if self.step() == StepStatus::Complete {
                break;
            }
            self.accumulator -= self.config.step_size_secs;
        }

        render(&RenderFrame {
            eye_lon: self.state.eye_lon,
            eye_lat: self.state.eye_lat,
            rect: self.last_rect,
            grid: &self.grid,
            samples: &self.field,
        });
        self.phase
    }

    /// Toggles the over-land flag; coastline lookup is the caller's concern.
    pub fn set_on_land(&mut self, on_land: bool) {
        self.state.on_land = on_land;
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn grid(&self) -> &WindGrid {
        &self.grid
    }

    pub fn state(&self) -> &ModelState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of physics steps run so far.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Simulated time covered so far, in hours.
    pub fn elapsed_hours(&self) -> f64 {
        self.step_count as f64 * self.config.step_size_secs / 3600.0
    }

    /// Highest grid speed recorded while the storm was over land, m/s.
    pub fn max_land_speed(&self) -> f64 {
        self.state.max_land_speed
    }

    /// Grid rectangle touched by the most recent step.
    pub fn last_rect(&self) -> Option<GridRect> {
        self.last_rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use windfield_core::track::Observation;

    fn westward_track() -> Track {
        let fix = |hour: f64, lon: f64| Observation {
            hour,
            lon,
            lat: 10.0,
            heading_deg: 270.0,
            forward_speed_kt: 12.0,
            central_pressure_mb: 950.0,
            max_wind_kt: 100.0,
        };
        Track::new("WEST", vec![fix(0.0, 0.0), fix(5.0, -1.0), fix(10.0, -2.0)]).unwrap()
    }

    fn hourly_config() -> ModelConfig {
        ModelConfig {
            grid_step_deg: 1.0,
            influence_radius_km: 300.0,
            step_size_secs: 3600.0,
            max_tick_secs: 3600.0,
            ..ModelConfig::default()
        }
    }

    fn engine() -> StormEngine {
        StormEngine::new(hourly_config(), westward_track()).unwrap()
    }

    #[test]
    fn new_rejects_degenerate_config() {
        let config = ModelConfig {
            step_size_secs: 0.0,
            ..hourly_config()
        };
        assert!(matches!(
            StormEngine::new(config, westward_track()),
            Err(ModelError::InvalidConfig(_))
        ));
    }

    #[test]
    fn phase_progresses_idle_running_complete() {
        let mut e = engine();
        assert_eq!(e.phase(), Phase::Idle);
        assert_eq!(e.step(), StepStatus::Stepped);
        assert_eq!(e.phase(), Phase::Running);
        while e.step() == StepStatus::Stepped {}
        assert_eq!(e.phase(), Phase::Complete);
    }

    #[test]
    fn hourly_steps_cover_the_track_inclusively() {
        let mut e = engine();
        while e.step() == StepStatus::Stepped {}
        // hours 0 through 10 inclusive
        assert_eq!(e.step_count(), 11);
        assert!((e.elapsed_hours() - 11.0).abs() < 1e-12);
    }

    #[test]
    fn completion_is_idempotent() {
        let mut e = engine();
        while e.step() == StepStatus::Stepped {}
        let nodes_before = e.grid().nodes().to_vec();
        let steps_before = e.step_count();

        assert_eq!(e.step(), StepStatus::Complete);
        let phase = e.tick(3600.0, |_| {});
        assert_eq!(phase, Phase::Complete);
        assert_eq!(e.step_count(), steps_before);
        assert_eq!(e.grid().nodes(), nodes_before.as_slice());
    }

    #[test]
    fn tick_banks_time_and_runs_whole_steps() {
        let config = ModelConfig {
            step_size_secs: 5.0,
            max_tick_secs: 2.0,
            ..hourly_config()
        };
        let mut e = StormEngine::new(config, westward_track()).unwrap();

        e.tick(2.0, |_| {});
        e.tick(2.0, |_| {});
        assert_eq!(e.step_count(), 0);
        e.tick(2.0, |_| {});
        assert_eq!(e.step_count(), 1);
    }

    #[test]
    fn tick_clamps_oversized_and_negative_elapsed() {
        let config = ModelConfig {
            step_size_secs: 5.0,
            max_tick_secs: 2.0,
            ..hourly_config()
        };
        let mut e = StormEngine::new(config, westward_track()).unwrap();

        // A stalled caller reporting a huge gap only banks max_tick_secs
        e.tick(1.0e6, |_| {});
        assert_eq!(e.step_count(), 0);
        e.tick(-50.0, |_| {});
        assert_eq!(e.step_count(), 0);
        e.tick(1.0e6, |_| {});
        e.tick(1.0e6, |_| {});
        assert_eq!(e.step_count(), 1);
    }

    #[test]
    fn render_callback_fires_once_per_tick() {
        let mut e = engine();
        let mut calls = 0;
        e.tick(0.0, |frame| {
            calls += 1;
            assert!(frame.rect.is_none());
        });
        e.tick(3600.0, |frame| {
            calls += 1;
            assert!(frame.rect.is_some());
        });
        assert_eq!(calls, 2);
    }

    #[test]
    fn identical_runs_produce_bit_identical_grids() {
        let run = || {
            let mut e = engine();
            for _ in 0..20 {
                e.tick(3600.0, |_| {});
            }
            e
        };
        let a = run();
        let b = run();
        assert_eq!(a.step_count(), b.step_count());
        for (na, nb) in a.grid().nodes().iter().zip(b.grid().nodes()) {
            assert_eq!(na.velocity.x.to_bits(), nb.velocity.x.to_bits());
            assert_eq!(na.velocity.y.to_bits(), nb.velocity.y.to_bits());
            assert_eq!(na.speed.to_bits(), nb.speed.to_bits());
            assert_eq!(na.max_speed.to_bits(), nb.max_speed.to_bits());
        }
    }

    #[test]
    fn eye_follows_the_track_west() {
        let mut e = engine();
        let mut last_lon = f64::INFINITY;
        while e.step() == StepStatus::Stepped {
            assert!(e.state().eye_lon <= last_lon + 1e-12);
            last_lon = e.state().eye_lon;
        }
        assert!((e.state().eye_lon - -2.0).abs() < 1e-9);
        assert!((e.state().eye_lat - 10.0).abs() < 1e-9);
    }

    #[test]
    fn peak_wind_tracks_the_storm_path() {
        let mut e = engine();
        while e.step() == StepStatus::Stepped {}

        let grid = e.grid();
        let all = windfield_core::grid::GridRect {
            min_meridian: 0,
            max_meridian: grid.n_meridians() - 1,
            min_parallel: 0,
            max_parallel: grid.n_parallels() - 1,
        };
        let (peak, m, p) = grid.peak_in(all);
        assert!(peak > 20.0, "peak {peak} m/s is implausibly weak");

        // The hottest cell sits on the track's latitude band, within the
        // traversed longitude span plus one cell of slack.
        assert!((grid.lat_at(p) - 10.0).abs() <= 1.0 + 1e-9);
        let lon = grid.lon_at(m);
        assert!((-3.0..=1.0).contains(&lon), "peak at lon {lon}");

        // The cell nearest the final eye position holds the run's peak.
        // Other on-track cells saw the same eye-relative geometry, so allow
        // a rounding-level tie.
        let final_eye = grid.node(grid.meridian_index(-2.0), grid.parallel_index(10.0));
        assert!(
            final_eye.max_speed >= peak - 1e-6,
            "final eye cell {} vs peak {peak}",
            final_eye.max_speed
        );
    }

    #[test]
    fn land_steps_raise_max_land_speed_and_fill_the_center() {
        let config = ModelConfig {
            filling_rate_mb_hr: 5.0,
            ..hourly_config()
        };
        let mut e = StormEngine::new(config, westward_track()).unwrap();
        e.step();
        let pressure_at_sea = e.state().central_pressure;
        assert_eq!(e.max_land_speed(), 0.0);

        e.set_on_land(true);
        e.step();
        assert!(e.max_land_speed() > 0.0);
        assert!(e.state().central_pressure > pressure_at_sea);
    }

    #[test]
    fn nws23_engine_runs_to_completion() {
        let config = ModelConfig {
            model: windfield_core::config::ModelKind::Nws23,
            ..hourly_config()
        };
        let mut e = StormEngine::new(config, westward_track()).unwrap();
        while e.step() == StepStatus::Stepped {}
        let eye = e
            .grid()
            .node(e.grid().meridian_index(-2.0), e.grid().parallel_index(10.0));
        assert!(eye.max_speed > 0.0);
    }
}
