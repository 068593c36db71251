use enum_dispatch::enum_dispatch;

use super::bands::{Band, CoefficientBands, Subband};
use super::lifting;
use crate::error::ShapeError;
use crate::grid::IntensityGrid;

/// A single level integer Haar decomposition strategy.
#[enum_dispatch]
pub trait Decompose {
    /// splits the grid into coefficient bands
    fn forward(&self, grid: &IntensityGrid) -> CoefficientBands;

    /// Merges bands back into a grid of the original, unpadded shape.
    ///
    /// Fails if a band is missing or does not have the dimensions the
    /// recorded grid shape requires.
    fn inverse(&self, bands: &CoefficientBands) -> Result<IntensityGrid, ShapeError>;

    /// bands that carry hidden bits, in canonical order
    fn embedding_bands(&self) -> &'static [Band];

    /// number of embedding positions a `rows` x `cols` grid offers
    fn capacity(&self, rows: usize, cols: usize) -> usize;
}

/// Selects how a grid is decomposed and which bands carry hidden bits.
#[enum_dispatch(Decompose)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandLayout {
    Flat(FlatLayout),
    FourBand(FourBandLayout),
}

impl Default for BandLayout {
    fn default() -> Self {
        FourBandLayout.into()
    }
}

/// Pairs the row-major flattened grid as one long sequence.
/// Only the detail band carries hidden bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlatLayout;

impl Decompose for FlatLayout {
    fn forward(&self, grid: &IntensityGrid) -> CoefficientBands {
        let (rows, cols) = grid.dimensions();
        let (approximation, detail) = lifting::forward(&widen(grid.samples()));
        let pairs = approximation.len();
        let usable = (1, grid.sample_count() / 2);

        CoefficientBands::new(
            rows,
            cols,
            vec![
                Subband::new(Band::Detail, (1, pairs), detail, usable),
                Subband::new(Band::Approximation, (1, pairs), approximation, usable),
            ],
        )
    }

    fn inverse(&self, bands: &CoefficientBands) -> Result<IntensityGrid, ShapeError> {
        let (rows, cols) = bands.shape();
        let expected = (1, (rows * cols).div_ceil(2));
        let detail = bands.band_checked(Band::Detail, expected)?;
        let approximation = bands.band_checked(Band::Approximation, expected)?;

        IntensityGrid::from_wide(rows, cols, lifting::inverse(approximation, detail, rows * cols))
    }

    fn embedding_bands(&self) -> &'static [Band] {
        &[Band::Detail]
    }

    fn capacity(&self, rows: usize, cols: usize) -> usize {
        rows * cols / 2
    }
}

/// Lifts every row, then every column of both row outputs,
/// which yields four bands of `ceil(rows / 2)` x `ceil(cols / 2)`.
/// All four bands carry hidden bits, details first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FourBandLayout;

impl Decompose for FourBandLayout {
    fn forward(&self, grid: &IntensityGrid) -> CoefficientBands {
        let (rows, cols) = grid.dimensions();
        let half_cols = cols.div_ceil(2);
        let half = (rows.div_ceil(2), half_cols);
        let usable = (rows / 2, cols / 2);

        let mut low = Vec::with_capacity(rows * half_cols);
        let mut high = Vec::with_capacity(rows * half_cols);
        for row in 0..rows {
            let (a, d) = lifting::forward(&widen(grid.row(row)));
            low.extend(a);
            high.extend(d);
        }

        let (low_low, low_high) = forward_columns(&low, rows, half_cols);
        let (high_low, high_high) = forward_columns(&high, rows, half_cols);

        CoefficientBands::new(
            rows,
            cols,
            vec![
                Subband::new(Band::LowHigh, half, low_high, usable),
                Subband::new(Band::HighLow, half, high_low, usable),
                Subband::new(Band::HighHigh, half, high_high, usable),
                Subband::new(Band::LowLow, half, low_low, usable),
            ],
        )
    }

    fn inverse(&self, bands: &CoefficientBands) -> Result<IntensityGrid, ShapeError> {
        let (rows, cols) = bands.shape();
        let half_cols = cols.div_ceil(2);
        let half = (rows.div_ceil(2), half_cols);

        let low = inverse_columns(
            bands.band_checked(Band::LowLow, half)?,
            bands.band_checked(Band::LowHigh, half)?,
            rows,
            half_cols,
        );
        let high = inverse_columns(
            bands.band_checked(Band::HighLow, half)?,
            bands.band_checked(Band::HighHigh, half)?,
            rows,
            half_cols,
        );

        let mut samples = Vec::with_capacity(rows * cols);
        for (a, d) in low.chunks(half_cols).zip(high.chunks(half_cols)) {
            samples.extend(lifting::inverse(a, d, cols));
        }

        IntensityGrid::from_wide(rows, cols, samples)
    }

    fn embedding_bands(&self) -> &'static [Band] {
        &[Band::LowHigh, Band::HighLow, Band::HighHigh, Band::LowLow]
    }

    fn capacity(&self, rows: usize, cols: usize) -> usize {
        (rows / 2) * (cols / 2) * 4
    }
}

fn widen(samples: &[i32]) -> Vec<i64> {
    samples.iter().copied().map(i64::from).collect()
}

/// lifts each column of a row-major `rows` x `cols` plane
fn forward_columns(plane: &[i64], rows: usize, cols: usize) -> (Vec<i64>, Vec<i64>) {
    let half_rows = rows.div_ceil(2);
    let mut low = vec![0; half_rows * cols];
    let mut high = vec![0; half_rows * cols];
    let mut column = Vec::with_capacity(rows);

    for col in 0..cols {
        column.clear();
        column.extend((0..rows).map(|row| plane[row * cols + col]));
        let (a, d) = lifting::forward(&column);
        for (row, (a, d)) in a.into_iter().zip(d).enumerate() {
            low[row * cols + col] = a;
            high[row * cols + col] = d;
        }
    }

    (low, high)
}

/// merges column lifted halves back into a row-major `rows` x `cols` plane
fn inverse_columns(low: &[i64], high: &[i64], rows: usize, cols: usize) -> Vec<i64> {
    let half_rows = rows.div_ceil(2);
    let mut plane = vec![0; rows * cols];
    let mut a = Vec::with_capacity(half_rows);
    let mut d = Vec::with_capacity(half_rows);

    for col in 0..cols {
        a.clear();
        d.clear();
        a.extend((0..half_rows).map(|row| low[row * cols + col]));
        d.extend((0..half_rows).map(|row| high[row * cols + col]));
        for (row, sample) in lifting::inverse(&a, &d, rows).into_iter().enumerate() {
            plane[row * cols + col] = sample;
        }
    }

    plane
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_grid(rows: usize, cols: usize, seed: u64, range: std::ops::Range<i32>) -> IntensityGrid {
        let mut rng = fastrand::Rng::with_seed(seed);
        IntensityGrid::from_fn(rows, cols, |_, _| rng.i32(range.clone())).unwrap()
    }

    fn layouts() -> [BandLayout; 2] {
        [FlatLayout.into(), FourBandLayout.into()]
    }

    #[test]
    fn should_reconstruct_every_shape_exactly() {
        for layout in layouts() {
            for rows in 1..=9 {
                for cols in 1..=9 {
                    let grid = random_grid(rows, cols, (rows * 31 + cols) as u64, -300..300);
                    let bands = layout.forward(&grid);

                    assert_eq!(
                        layout.inverse(&bands).unwrap(),
                        grid,
                        "{layout:?} failed for {rows}x{cols}"
                    );
                }
            }
        }
    }

    #[test]
    fn should_reconstruct_values_beyond_the_8_bit_range() {
        for layout in layouts() {
            let grid = random_grid(37, 53, 99, -(1 << 20)..(1 << 20));

            assert_eq!(layout.inverse(&layout.forward(&grid)).unwrap(), grid);
        }
    }

    #[test]
    fn should_reconstruct_the_i32_extremes() {
        let extremes = IntensityGrid::from_rows(&[
            [i32::MAX, i32::MAX - 1, i32::MIN],
            [1 << 30, -(1 << 30), i32::MAX],
            [i32::MIN, i32::MAX, i32::MIN + 1],
        ])
        .unwrap();
        let checkerboard =
            IntensityGrid::from_fn(6, 6, |r, c| if (r + c) % 2 == 0 { i32::MAX } else { i32::MIN })
                .unwrap();

        for layout in layouts() {
            for grid in [&extremes, &checkerboard] {
                assert_eq!(layout.inverse(&layout.forward(grid)).unwrap(), *grid, "{layout:?}");
            }
        }
    }

    #[test]
    fn should_reject_reconstructed_samples_beyond_i32() {
        let grid = IntensityGrid::from_rows(&[[i32::MAX, i32::MAX]]).unwrap();
        let mut bands = FlatLayout.forward(&grid);
        bands.subband_mut(Band::Detail).unwrap().coefficients_mut()[0] = 2;

        assert_eq!(
            FlatLayout.inverse(&bands),
            Err(ShapeError::SampleOutOfRange {
                row: 0,
                col: 0,
                value: i64::from(i32::MAX) + 1
            })
        );
    }

    #[test]
    fn should_produce_four_quarter_bands() {
        let grid = IntensityGrid::from_fn(4, 4, |r, c| 10 + (r * 4 + c) as i32).unwrap();
        let bands = FourBandLayout.forward(&grid);

        let order: Vec<Band> = bands.subbands().iter().map(Subband::band).collect();
        assert_eq!(
            order,
            vec![Band::LowHigh, Band::HighLow, Band::HighHigh, Band::LowLow]
        );
        for subband in bands.subbands() {
            assert_eq!(subband.dimensions(), (2, 2));
        }
        // rows of the ramp differ by 4, neighbours by 1
        assert_eq!(bands.subband(Band::HighLow).unwrap().coefficients(), &[-1; 4]);
        assert_eq!(bands.subband(Band::LowHigh).unwrap().coefficients(), &[-4; 4]);
        assert_eq!(bands.subband(Band::HighHigh).unwrap().coefficients(), &[0; 4]);
        assert_eq!(
            bands.subband(Band::LowLow).unwrap().coefficients(),
            &[12, 14, 20, 22]
        );
    }

    #[test]
    fn should_keep_the_padded_coefficient_count() {
        for (rows, cols) in [(4, 4), (5, 4), (4, 7), (7, 9), (1, 1), (1, 6)] {
            let grid = random_grid(rows, cols, 7, 0..256);
            let padded = rows.div_ceil(2) * 2 * cols.div_ceil(2) * 2;

            assert_eq!(FourBandLayout.forward(&grid).coefficient_count(), padded);
            assert_eq!(
                FlatLayout.forward(&grid).coefficient_count(),
                (rows * cols).div_ceil(2) * 2
            );
        }
    }

    #[test]
    fn should_count_capacity_as_usable_positions() {
        for layout in layouts() {
            for (rows, cols) in [(4, 4), (5, 4), (4, 7), (7, 9), (1, 1), (1, 6), (256, 256)] {
                let grid = random_grid(rows, cols, 3, 0..256);
                let bands = layout.forward(&grid);

                assert_eq!(
                    bands.positions(layout.embedding_bands()).count(),
                    layout.capacity(rows, cols),
                    "{layout:?} for {rows}x{cols}"
                );
            }
        }
        assert_eq!(FourBandLayout.capacity(4, 4), 16);
        assert_eq!(FlatLayout.capacity(4, 4), 8);
    }

    #[test]
    fn should_preserve_modified_usable_coefficients() {
        // flipping LSBs of usable positions must survive inverse and forward again
        for layout in layouts() {
            for (rows, cols) in [(8, 8), (9, 7), (3, 11)] {
                let grid = random_grid(rows, cols, 11, 40..200);
                let mut bands = layout.forward(&grid);
                for (i, c) in bands.positions_mut(layout.embedding_bands()).enumerate() {
                    if i % 3 == 0 {
                        *c ^= 1;
                    }
                }

                let modified = layout.inverse(&bands).unwrap();
                let again = layout.forward(&modified);
                assert_eq!(again, bands, "{layout:?} for {rows}x{cols}");
            }
        }
    }

    #[test]
    fn should_reject_bands_of_another_layout() {
        let grid = random_grid(4, 4, 1, 0..256);
        let flat = FlatLayout.forward(&grid);

        assert_eq!(
            FourBandLayout.inverse(&flat),
            Err(ShapeError::MissingBand(Band::LowLow))
        );
    }

    #[test]
    fn should_default_to_four_bands() {
        assert_eq!(BandLayout::default(), BandLayout::FourBand(FourBandLayout));
    }
}
