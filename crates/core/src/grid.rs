//! Fixed-resolution global wind grid.
//!
//! The grid covers the whole globe at a fixed step in degrees, stored as a
//! flat pre-allocated row-major `Vec` (meridian-major: index = meridian *
//! n_parallels + parallel). Only the cells inside a storm's influence
//! rectangle are touched each step; their running maxima persist across
//! steps while current velocities are reset before repopulation.

use crate::error::ModelError;
use glam::DVec2;

/// One global grid cell's wind data, in m/s.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GridNode {
    /// Current (east, north) velocity.
    pub velocity: DVec2,
    /// Current scalar speed.
    pub speed: f64,
    /// Running maximum speed observed at this cell.
    pub max_speed: f64,
}

/// Inclusive index bounds of the sub-rectangle touched in one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRect {
    pub min_meridian: usize,
    pub max_meridian: usize,
    pub min_parallel: usize,
    pub max_parallel: usize,
}

impl GridRect {
    /// Number of cells covered by the rectangle.
    pub fn cell_count(&self) -> usize {
        (self.max_meridian - self.min_meridian + 1) * (self.max_parallel - self.min_parallel + 1)
    }

    /// Whether the given cell lies inside the rectangle.
    pub fn contains(&self, meridian: usize, parallel: usize) -> bool {
        (self.min_meridian..=self.max_meridian).contains(&meridian)
            && (self.min_parallel..=self.max_parallel).contains(&parallel)
    }
}

/// Flat global lat/lon grid of [`GridNode`]s at a fixed degree step.
#[derive(Debug, Clone)]
pub struct WindGrid {
    step_deg: f64,
    n_meridians: usize,
    n_parallels: usize,
    nodes: Vec<GridNode>,
}

impl WindGrid {
    /// Creates a zeroed global grid.
    ///
    /// Returns `ModelError::InvalidConfig` unless `0 < step_deg <= 90`.
    pub fn new(step_deg: f64) -> Result<Self, ModelError> {
        if !step_deg.is_finite() || step_deg <= 0.0 || step_deg > 90.0 {
            return Err(ModelError::InvalidConfig(format!(
                "grid step must be in (0, 90] degrees, got {step_deg}"
            )));
        }
        let n_meridians = (360.0 / step_deg).round() as usize;
        let n_parallels = (180.0 / step_deg).round() as usize;
        Ok(Self {
            step_deg,
            n_meridians,
            n_parallels,
            nodes: vec![GridNode::default(); n_meridians * n_parallels],
        })
    }

    /// Grid step in degrees.
    pub fn step_deg(&self) -> f64 {
        self.step_deg
    }

    /// Number of meridian columns (360 / step).
    pub fn n_meridians(&self) -> usize {
        self.n_meridians
    }

    /// Number of parallel rows (180 / step).
    pub fn n_parallels(&self) -> usize {
        self.n_parallels
    }

    /// Index of the meridian nearest to `lon`, clamped to bounds.
    pub fn meridian_index(&self, lon: f64) -> usize {
        let idx = ((180.0 + lon) / self.step_deg).round();
        (idx.max(0.0) as usize).min(self.n_meridians - 1)
    }

    /// Index of the parallel nearest to `lat`, clamped to bounds.
    pub fn parallel_index(&self, lat: f64) -> usize {
        let idx = ((90.0 + lat) / self.step_deg).round();
        (idx.max(0.0) as usize).min(self.n_parallels - 1)
    }

    /// Longitude of a meridian column's cell centers.
    pub fn lon_at(&self, meridian: usize) -> f64 {
        meridian as f64 * self.step_deg - 180.0
    }

    /// Latitude of a parallel row's cell centers.
    pub fn lat_at(&self, parallel: usize) -> f64 {
        parallel as f64 * self.step_deg - 90.0
    }

    /// Read access to a cell.
    pub fn node(&self, meridian: usize, parallel: usize) -> &GridNode {
        &self.nodes[meridian * self.n_parallels + parallel]
    }

    /// Write access to a cell.
    pub fn node_mut(&mut self, meridian: usize, parallel: usize) -> &mut GridNode {
        &mut self.nodes[meridian * self.n_parallels + parallel]
    }

    /// Read-only access to the whole node array (meridian-major).
    pub fn nodes(&self) -> &[GridNode] {
        &self.nodes
    }

    /// An inclusive rectangle of `half_extent` cells around a center cell,
    /// clamped to grid bounds.
    pub fn rect_around(&self, meridian: usize, parallel: usize, half_extent: usize) -> GridRect {
        GridRect {
            min_meridian: meridian.saturating_sub(half_extent),
            max_meridian: (meridian + half_extent).min(self.n_meridians - 1),
            min_parallel: parallel.saturating_sub(half_extent),
            max_parallel: (parallel + half_extent).min(self.n_parallels - 1),
        }
    }

    /// Zeroes the current velocity and speed of every cell in `rect`,
    /// preserving running maxima.
    pub fn reset_region(&mut self, rect: GridRect) {
        for m in rect.min_meridian..=rect.max_meridian {
            for p in rect.min_parallel..=rect.max_parallel {
                let node = self.node_mut(m, p);
                node.velocity = DVec2::ZERO;
                node.speed = 0.0;
            }
        }
    }

    /// Maximum running-max speed inside `rect`, with the cell that holds it.
    pub fn peak_in(&self, rect: GridRect) -> (f64, usize, usize) {
        let mut best = (0.0_f64, rect.min_meridian, rect.min_parallel);
        for m in rect.min_meridian..=rect.max_meridian {
            for p in rect.min_parallel..=rect.max_parallel {
                let node = self.node(m, p);
                if node.max_speed > best.0 {
                    best = (node.max_speed, m, p);
                }
            }
        }
        best
    }
}
