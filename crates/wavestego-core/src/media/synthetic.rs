//! Deterministic test carriers.

use crate::error::ShapeError;
use crate::grid::IntensityGrid;

/// radii of the apple on a 256x256 canvas
const CORE_RADIUS: f64 = 80.0;
const RIM_RADIUS: f64 = 100.0;
const REFERENCE_SIZE: f64 = 256.0;

/// Renders a textured, apple like disc.
///
/// A bright core with a fine ripple, a darker rim and a dim background, each
/// sample jittered by seeded noise in `-15..15`. Samples stay within
/// `[25, 215]`, so hiding never needs to clip. The same `seed` always yields
/// the same grid.
pub fn apple(rows: usize, cols: usize, seed: u64) -> Result<IntensityGrid, ShapeError> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let scale = rows.min(cols) as f64 / REFERENCE_SIZE;
    let (center_row, center_col) = ((rows / 2) as f64, (cols / 2) as f64);

    IntensityGrid::from_fn(rows, cols, |row, col| {
        let (i, j) = (row as f64, col as f64);
        let dist = (i - center_row).hypot(j - center_col);
        let (i, j) = (i / scale.max(f64::EPSILON), j / scale.max(f64::EPSILON));

        let base = if dist < CORE_RADIUS * scale {
            180 + (20.0 * (i * 0.1).sin() * (j * 0.1).cos()) as i32
        } else if dist < RIM_RADIUS * scale {
            120 + (30.0 * (i * 0.05).sin() * (j * 0.05).cos()) as i32
        } else {
            50 + (10.0 * (i * 0.03).sin() * (j * 0.03).cos()) as i32
        };

        (base + rng.i32(-15..15)).clamp(0, 255)
    })
}
