//! Fixed polar sampling pattern around the storm eye.
//!
//! Radial distances grow logarithmically (dense near the eye, reaching the
//! influence radius at the last ring); angular spokes are uniform over 360°.
//! The eye-relative offsets are precomputed once per configuration and never
//! mutated; the per-step wind values live in the parallel [`SampleField`].

use glam::DVec2;
use windfield_core::error::ModelError;

/// Immutable polar sample pattern: distances, angles, and offsets.
#[derive(Debug, Clone)]
pub struct SampleGrid {
    n_radial: usize,
    n_angular: usize,
    angles_deg: Vec<f64>,
    distances_m: Vec<f64>,
    /// Eye-relative offsets in meters, `[angular * n_radial + radial]`.
    offsets: Vec<DVec2>,
}

/// The four polar samples bracketing a point: (angular, radial) index pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleBracket {
    pub indices: [(usize, usize); 4],
}

impl SampleGrid {
    /// Precomputes the sampling pattern.
    ///
    /// `distance[j] = (exp(j * ln(influence_km) / (n_radial - 1)) - 1) * 1000`
    /// meters; `angle[i] = i * 360 / n_angular` degrees.
    pub fn new(
        n_radial: usize,
        n_angular: usize,
        influence_radius_km: f64,
    ) -> Result<Self, ModelError> {
        if n_radial <= 1 || n_angular <= 2 {
            return Err(ModelError::InvalidConfig(format!(
                "sample pattern needs n_radial > 1 and n_angular > 2, got {n_radial}/{n_angular}"
            )));
        }
        if !influence_radius_km.is_finite() || influence_radius_km <= 1.0 {
            return Err(ModelError::InvalidConfig(format!(
                "influence radius must exceed 1 km, got {influence_radius_km}"
            )));
        }

        let angle_increment = 360.0 / n_angular as f64;
        let angles_deg: Vec<f64> = (0..n_angular).map(|i| i as f64 * angle_increment).collect();

        let log_increment = influence_radius_km.ln() / (n_radial as f64 - 1.0);
        let distances_m: Vec<f64> = (0..n_radial)
            .map(|j| ((j as f64 * log_increment).exp() - 1.0) * 1000.0)
            .collect();

        let mut offsets = Vec::with_capacity(n_angular * n_radial);
        for &angle in &angles_deg {
            let (sin_a, cos_a) = angle.to_radians().sin_cos();
            for &dist in &distances_m {
                offsets.push(DVec2::new(dist * cos_a, dist * sin_a));
            }
        }

        Ok(Self {
            n_radial,
            n_angular,
            angles_deg,
            distances_m,
            offsets,
        })
    }

    pub fn n_radial(&self) -> usize {
        self.n_radial
    }

    pub fn n_angular(&self) -> usize {
        self.n_angular
    }

    /// Angular spoke direction in degrees.
    pub fn angle_deg(&self, angular: usize) -> f64 {
        self.angles_deg[angular]
    }

    /// Ring distance from the eye in meters.
    pub fn distance_m(&self, radial: usize) -> f64 {
        self.distances_m[radial]
    }

    /// Eye-relative offset of one sample, in meters.
    pub fn offset(&self, angular: usize, radial: usize) -> DVec2 {
        self.offsets[angular * self.n_radial + radial]
    }

    /// Finds the four samples bracketing an eye-relative point.
    ///
    /// Azimuth is bucketed to the nearest spoke (wrapping at the last), and
    /// the radial bracket is the first ring whose distance exceeds the
    /// point's radius together with the ring inside it. Returns `None` when
    /// the point lies beyond the outermost ring — a defined zero-contribution
    /// case, not an error.
    pub fn find_bracket(&self, point: DVec2) -> Option<SampleBracket> {
        let mut angle = point.y.atan2(point.x).to_degrees();
        if angle < 0.0 {
            angle += 360.0;
        }
        let spoke =
            ((angle / 360.0 * self.n_angular as f64).round() as usize) % self.n_angular;
        let next_spoke = (spoke + 1) % self.n_angular;

        let radius = point.length();
        let outer = self.distances_m.iter().position(|&d| d > radius)?;
        let inner = outer.max(1) - 1;

        Some(SampleBracket {
            indices: [
                (spoke, inner),
                (spoke, outer),
                (next_spoke, inner),
                (next_spoke, outer),
            ],
        })
    }
}

/// One sample's wind value for the current instant.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SampleValue {
    /// (east, north) velocity in m/s.
    pub velocity: DVec2,
    /// Scalar speed in m/s.
    pub speed: f64,
}

/// Per-step wind values at every polar sample, overwritten each step.
#[derive(Debug, Clone)]
pub struct SampleField {
    n_radial: usize,
    data: Vec<SampleValue>,
}

impl SampleField {
    /// Zeroed field matching a sample grid's shape.
    pub fn new(grid: &SampleGrid) -> Self {
        Self {
            n_radial: grid.n_radial(),
            data: vec![SampleValue::default(); grid.n_angular() * grid.n_radial()],
        }
    }

    pub fn get(&self, angular: usize, radial: usize) -> SampleValue {
        self.data[angular * self.n_radial + radial]
    }

    pub fn set(&mut self, angular: usize, radial: usize, value: SampleValue) {
        self.data[angular * self.n_radial + radial] = value;
    }

    /// Read-only access to all values, angular-major.
    pub fn values(&self) -> &[SampleValue] {
        &self.data
    }
}
