//! Engine configuration: model selection, sampling pattern, grid resolution,
//! timestep, and physical constants.
//!
//! Configuration is immutable after the engine is built. Validation is
//! fail-fast: a degenerate value is reported here as `InvalidConfig` and can
//! never reach the stepping loop.

use crate::error::ModelError;
use crate::params::{param_f64, param_string, param_usize};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Peripheral (environmental) pressure in millibars.
pub const DEFAULT_PERIPHERAL_PRESSURE_MB: f64 = 1013.0;
/// Surface inflow angle in degrees.
pub const DEFAULT_INFLOW_ANGLE_DEG: f64 = 20.0;
/// Coriolis parameter in the tropics (1/s).
pub const DEFAULT_CORIOLIS: f64 = 2.0e-5;
/// Density of air at the surface (kg/m^3).
pub const DEFAULT_AIR_DENSITY: f64 = 1.225;
/// Radius of storm influence in km.
pub const DEFAULT_INFLUENCE_RADIUS_KM: f64 = 750.0;
/// Number of radial sample rings.
pub const DEFAULT_N_RADIAL_SAMPLES: usize = 12;
/// Number of angular sample spokes.
pub const DEFAULT_N_ANGULAR_SAMPLES: usize = 15;
/// Global grid step in degrees.
pub const DEFAULT_GRID_STEP_DEG: f64 = 0.5;
/// Physics step in seconds.
pub const DEFAULT_STEP_SIZE_SECS: f64 = 600.0;
/// Cap on elapsed time accepted per tick, in seconds.
pub const DEFAULT_MAX_TICK_SECS: f64 = 2.0;
/// Initial radius to maximum wind in km.
pub const DEFAULT_INITIAL_RMAX_KM: f64 = 50.0;
/// Lower clamp on radius to maximum wind (km).
pub const DEFAULT_RMAX_MIN_KM: f64 = 2.0;
/// Upper clamp on radius to maximum wind (km).
pub const DEFAULT_RMAX_MAX_KM: f64 = 200.0;

/// Parametric wind-profile variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Holland (1980) pressure-profile model.
    Holland,
    /// NWS Technical Report 23 model.
    Nws23,
}

impl ModelKind {
    /// Constructs a model kind by name.
    pub fn from_name(name: &str) -> Result<Self, ModelError> {
        match name.to_ascii_lowercase().as_str() {
            "holland" => Ok(ModelKind::Holland),
            "nws23" => Ok(ModelKind::Nws23),
            _ => Err(ModelError::UnknownModel(name.to_string())),
        }
    }

    /// All recognized model names.
    pub fn list_names() -> &'static [&'static str] {
        &["holland", "nws23"]
    }

    /// The canonical name of this variant.
    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::Holland => "holland",
            ModelKind::Nws23 => "nws23",
        }
    }
}

/// Immutable engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Which parametric wind profile to evaluate.
    pub model: ModelKind,
    /// Number of radial sample rings (> 1).
    pub n_radial_samples: usize,
    /// Number of angular sample spokes (> 2).
    pub n_angular_samples: usize,
    /// Radius of storm influence in km (> 0).
    pub influence_radius_km: f64,
    /// Global grid step in degrees.
    pub grid_step_deg: f64,
    /// Fixed physics step in seconds (> 0).
    pub step_size_secs: f64,
    /// Cap on elapsed wall time accepted per tick, in seconds.
    pub max_tick_secs: f64,
    /// Coriolis parameter (1/s).
    pub coriolis: f64,
    /// Air density (kg/m^3).
    pub air_density: f64,
    /// Peripheral pressure (mb).
    pub peripheral_pressure_mb: f64,
    /// Surface inflow angle (degrees).
    pub inflow_angle_deg: f64,
    /// Rate at which the center fills over land (mb/hr).
    pub filling_rate_mb_hr: f64,
    /// Rate of increase of RMAX over land (km/hr).
    pub rmax_growth_km_hr: f64,
    /// Initial radius to maximum wind (km).
    pub initial_rmax_km: f64,
    /// Lower clamp on RMAX (km).
    pub rmax_min_km: f64,
    /// Upper clamp on RMAX (km).
    pub rmax_max_km: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: ModelKind::Holland,
            n_radial_samples: DEFAULT_N_RADIAL_SAMPLES,
            n_angular_samples: DEFAULT_N_ANGULAR_SAMPLES,
            influence_radius_km: DEFAULT_INFLUENCE_RADIUS_KM,
            grid_step_deg: DEFAULT_GRID_STEP_DEG,
            step_size_secs: DEFAULT_STEP_SIZE_SECS,
            max_tick_secs: DEFAULT_MAX_TICK_SECS,
            coriolis: DEFAULT_CORIOLIS,
            air_density: DEFAULT_AIR_DENSITY,
            peripheral_pressure_mb: DEFAULT_PERIPHERAL_PRESSURE_MB,
            inflow_angle_deg: DEFAULT_INFLOW_ANGLE_DEG,
            filling_rate_mb_hr: 0.0,
            rmax_growth_km_hr: 0.0,
            initial_rmax_km: DEFAULT_INITIAL_RMAX_KM,
            rmax_min_km: DEFAULT_RMAX_MIN_KM,
            rmax_max_km: DEFAULT_RMAX_MAX_KM,
        }
    }
}

impl ModelConfig {
    /// Builds a configuration from a JSON object, falling back to defaults
    /// for missing keys, then validates it.
    pub fn from_json(params: &Value) -> Result<Self, ModelError> {
        let d = Self::default();
        let config = Self {
            model: ModelKind::from_name(&param_string(params, "model", d.model.name()))?,
            n_radial_samples: param_usize(params, "n_radial_samples", d.n_radial_samples),
            n_angular_samples: param_usize(params, "n_angular_samples", d.n_angular_samples),
            influence_radius_km: param_f64(params, "influence_radius_km", d.influence_radius_km),
            grid_step_deg: param_f64(params, "grid_step_deg", d.grid_step_deg),
            step_size_secs: param_f64(params, "step_size_secs", d.step_size_secs),
            max_tick_secs: param_f64(params, "max_tick_secs", d.max_tick_secs),
            coriolis: param_f64(params, "coriolis", d.coriolis),
            air_density: param_f64(params, "air_density", d.air_density),
            peripheral_pressure_mb: param_f64(
                params,
                "peripheral_pressure_mb",
                d.peripheral_pressure_mb,
            ),
            inflow_angle_deg: param_f64(params, "inflow_angle_deg", d.inflow_angle_deg),
            filling_rate_mb_hr: param_f64(params, "filling_rate_mb_hr", d.filling_rate_mb_hr),
            rmax_growth_km_hr: param_f64(params, "rmax_growth_km_hr", d.rmax_growth_km_hr),
            initial_rmax_km: param_f64(params, "initial_rmax_km", d.initial_rmax_km),
            rmax_min_km: param_f64(params, "rmax_min_km", d.rmax_min_km),
            rmax_max_km: param_f64(params, "rmax_max_km", d.rmax_max_km),
        };
        config.validate()?;
        Ok(config)
    }

    /// Fail-fast validation of every constraint the stepping loop relies on.
    pub fn validate(&self) -> Result<(), ModelError> {
        fn fail(msg: String) -> Result<(), ModelError> {
            Err(ModelError::InvalidConfig(msg))
        }

        if self.n_radial_samples <= 1 {
            return fail(format!(
                "n_radial_samples must be > 1, got {}",
                self.n_radial_samples
            ));
        }
        if self.n_angular_samples <= 2 {
            return fail(format!(
                "n_angular_samples must be > 2, got {}",
                self.n_angular_samples
            ));
        }
        if !self.influence_radius_km.is_finite() || self.influence_radius_km <= 0.0 {
            return fail(format!(
                "influence_radius_km must be > 0, got {}",
                self.influence_radius_km
            ));
        }
        if !self.grid_step_deg.is_finite() || self.grid_step_deg <= 0.0 || self.grid_step_deg > 90.0
        {
            return fail(format!(
                "grid_step_deg must be in (0, 90], got {}",
                self.grid_step_deg
            ));
        }
        if !self.step_size_secs.is_finite() || self.step_size_secs <= 0.0 {
            return fail(format!(
                "step_size_secs must be > 0, got {}",
                self.step_size_secs
            ));
        }
        if !self.max_tick_secs.is_finite() || self.max_tick_secs <= 0.0 {
            return fail(format!(
                "max_tick_secs must be > 0, got {}",
                self.max_tick_secs
            ));
        }
        if !self.air_density.is_finite() || self.air_density <= 0.0 {
            return fail(format!("air_density must be > 0, got {}", self.air_density));
        }
        if self.rmax_min_km <= 0.0 || self.rmax_max_km <= self.rmax_min_km {
            return fail(format!(
                "rmax bounds must satisfy 0 < min < max, got [{}, {}]",
                self.rmax_min_km, self.rmax_max_km
            ));
        }
        if self.initial_rmax_km <= 0.0 {
            return fail(format!(
                "initial_rmax_km must be > 0, got {}",
                self.initial_rmax_km
            ));
        }
        if self.filling_rate_mb_hr < 0.0 || self.rmax_growth_km_hr < 0.0 {
            return fail("land-transition rates must be non-negative".into());
        }
        Ok(())
    }
}
