//! Accumulation of polar wind samples onto the global grid.
//!
//! Each step touches only a bounding rectangle of cells around the eye wide
//! enough to cover the influence radius. Every covered cell is reset, then
//! repopulated by inverse-distance weighting the four polar samples that
//! bracket it; cells beyond the outermost sample ring keep zero wind.

use crate::sampler::{SampleField, SampleGrid};
use crate::state::ModelState;
use windfield_core::geo::{local_offset_m, METERS_PER_DEG};
use windfield_core::grid::{GridRect, WindGrid};

/// Lower bound on the cell-to-sample distance used for weighting, so a cell
/// landing exactly on a sample does not divide by zero.
const MIN_SAMPLE_DISTANCE_M: f64 = 1e-3;

/// Spreads the current sample field onto the grid around the eye.
///
/// Returns the touched rectangle. Updates each covered cell's velocity,
/// speed, and running maximum; while the storm is over land the state's
/// maximum land speed is raised as well.
pub fn accumulate(
    grid: &mut WindGrid,
    pattern: &SampleGrid,
    field: &SampleField,
    state: &mut ModelState,
    influence_radius_km: f64,
) -> GridRect {
    let eye_meridian = grid.meridian_index(state.eye_lon);
    let eye_parallel = grid.parallel_index(state.eye_lat);
    let step_m = grid.step_deg() * METERS_PER_DEG;
    let half_extent = (influence_radius_km * 1000.0 / step_m).round() as usize;

    let rect = grid.rect_around(eye_meridian, eye_parallel, half_extent);
    grid.reset_region(rect);

    for meridian in rect.min_meridian..=rect.max_meridian {
        let lon = grid.lon_at(meridian);
        for parallel in rect.min_parallel..=rect.max_parallel {
            let lat = grid.lat_at(parallel);
            let point = local_offset_m(lon, lat, state.eye_lon, state.eye_lat);

            // A cell beyond the outermost ring gets no contribution.
            let Some(bracket) = pattern.find_bracket(point) else {
                continue;
            };

            let mut velocity = glam::DVec2::ZERO;
            let mut sum_weight = 0.0;
            for (angular, radial) in bracket.indices {
                let sample_pos = pattern.offset(angular, radial);
                let distance = (sample_pos - point).length().max(MIN_SAMPLE_DISTANCE_M);
                let weight = 1.0 / distance;
                velocity += field.get(angular, radial).velocity * weight;
                sum_weight += weight;
            }
            velocity /= sum_weight;

            let node = grid.node_mut(meridian, parallel);
            node.velocity = velocity;
            node.speed = velocity.length();
            if node.speed > node.max_speed {
                node.max_speed = node.speed;
            }
            if state.on_land && node.speed > state.max_land_speed {
                state.max_land_speed = node.speed;
            }
        }
    }

    rect
}
