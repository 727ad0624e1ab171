//! Grayscale PNG snapshots of the wind grid.
//!
//! Feature-gated behind `png` (default on) so embedders can depend on the
//! model crate without pulling in the `image` crate. Only the given grid
//! rectangle is written, one pixel per cell, north-up.

use std::path::Path;

use windfield_core::error::ModelError;
use windfield_core::grid::{GridRect, WindGrid};

/// Converts a grid rectangle to a luma byte buffer, north-up.
///
/// Each cell's running-max speed is normalized against the rectangle's peak;
/// a rectangle that never saw wind comes out all black. Buffer length is
/// `width * height` with width spanning meridians.
pub fn rect_to_luma(grid: &WindGrid, rect: GridRect) -> Vec<u8> {
    let (peak, _, _) = grid.peak_in(rect);
    let width = rect.max_meridian - rect.min_meridian + 1;
    let height = rect.max_parallel - rect.min_parallel + 1;

    let mut buf = Vec::with_capacity(width * height);
    for row in 0..height {
        let parallel = rect.max_parallel - row;
        for col in 0..width {
            let node = grid.node(rect.min_meridian + col, parallel);
            let t = if peak > 0.0 { node.max_speed / peak } else { 0.0 };
            buf.push((t * 255.0).round() as u8);
        }
    }
    buf
}

/// Writes a grid rectangle as a grayscale PNG.
pub fn write_png(grid: &WindGrid, rect: GridRect, path: &Path) -> Result<(), ModelError> {
    let buf = rect_to_luma(grid, rect);
    let w = u32::try_from(rect.max_meridian - rect.min_meridian + 1)
        .map_err(|_| ModelError::InvalidConfig("snapshot rectangle too wide".into()))?;
    let h = u32::try_from(rect.max_parallel - rect.min_parallel + 1)
        .map_err(|_| ModelError::InvalidConfig("snapshot rectangle too tall".into()))?;
    let img = image::GrayImage::from_raw(w, h, buf)
        .ok_or_else(|| ModelError::Io("luma buffer size mismatch".into()))?;
    img.save(path).map_err(|e| ModelError::Io(e.to_string()))
}
