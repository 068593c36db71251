use crate::error::ShapeError;

/// A single channel grid of intensity samples, stored row-major.
///
/// Samples are signed so the grid can carry values outside of [0, 255] while it
/// travels through the transform; [`IntensityGrid::clipped`] brings it back into
/// the 8-bit range right before it is handed to an image writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityGrid {
    rows: usize,
    cols: usize,
    samples: Vec<i32>,
}

impl IntensityGrid {
    /// constructor for row-major `samples` with the given dimensions
    pub fn new(rows: usize, cols: usize, samples: Vec<i32>) -> Result<Self, ShapeError> {
        if rows == 0 || cols == 0 {
            return Err(ShapeError::Empty);
        }
        if samples.len() != rows * cols {
            return Err(ShapeError::DataLength {
                rows,
                cols,
                len: samples.len(),
            });
        }

        Ok(Self {
            rows,
            cols,
            samples,
        })
    }

    /// Builds a grid from wide samples, as reconstructed by an inverse transform.
    ///
    /// Fails for the first sample that does not fit into `i32`.
    pub fn from_wide(rows: usize, cols: usize, samples: Vec<i64>) -> Result<Self, ShapeError> {
        let samples = samples
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                i32::try_from(value).map_err(|_| ShapeError::SampleOutOfRange {
                    row: index / cols.max(1),
                    col: index % cols.max(1),
                    value,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(rows, cols, samples)
    }

    /// builds a grid from nested rows, all rows need the same length
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self, ShapeError> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut samples = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(ShapeError::Ragged {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            samples.extend_from_slice(values);
        }

        Self::new(rows.len(), cols, samples)
    }

    /// builds a grid by calling `f(row, col)` in row-major order
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Result<Self, ShapeError>
    where
        F: FnMut(usize, usize) -> i32,
    {
        let mut samples = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                samples.push(f(row, col));
            }
        }

        Self::new(rows, cols, samples)
    }

    /// builds a grid from 8-bit luma samples, as delivered by an image decoder
    pub fn from_luma(rows: usize, cols: usize, luma: &[u8]) -> Result<Self, ShapeError> {
        Self::new(rows, cols, luma.iter().copied().map(i32::from).collect())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<i32> {
        if row < self.rows && col < self.cols {
            self.samples.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    pub fn set(&mut self, row: usize, col: usize, value: i32) -> Option<i32> {
        if row < self.rows && col < self.cols {
            self.samples
                .get_mut(row * self.cols + col)
                .map(|s| std::mem::replace(s, value))
        } else {
            None
        }
    }

    /// all samples of one row, panics if `row` is out of range
    pub fn row(&self, row: usize) -> &[i32] {
        &self.samples[row * self.cols..(row + 1) * self.cols]
    }

    pub fn samples(&self) -> &[i32] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<i32> {
        self.samples
    }

    /// Clamps every sample to [0, 255] and returns the clamped grid together
    /// with the number of samples that had to be changed.
    ///
    /// Clipping alters coefficients after the fact, a non zero count means
    /// hidden bits may not survive.
    pub fn clipped(&self) -> (IntensityGrid, usize) {
        let mut clipped = 0;
        let samples = self
            .samples
            .iter()
            .map(|&s| {
                let c = s.clamp(0, i32::from(u8::MAX));
                if c != s {
                    clipped += 1;
                }
                c
            })
            .collect();

        (
            IntensityGrid {
                rows: self.rows,
                cols: self.cols,
                samples,
            },
            clipped,
        )
    }

    /// 8-bit luma samples, clamped to [0, 255]
    pub fn to_luma8(&self) -> Vec<u8> {
        self.samples
            .iter()
            .map(|&s| s.clamp(0, i32::from(u8::MAX)) as u8)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_from_rows() {
        let grid = IntensityGrid::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();

        assert_eq!(grid.dimensions(), (2, 3));
        assert_eq!(grid.row(1), &[4, 5, 6]);
        assert_eq!(grid.get(0, 2), Some(3));
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn should_reject_ragged_rows() {
        let rows: Vec<Vec<i32>> = vec![vec![1, 2, 3], vec![4, 5]];

        assert_eq!(
            IntensityGrid::from_rows(&rows),
            Err(ShapeError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn should_reject_empty_grids() {
        let rows: Vec<Vec<i32>> = vec![];

        assert_eq!(IntensityGrid::from_rows(&rows), Err(ShapeError::Empty));
        assert_eq!(IntensityGrid::new(3, 0, vec![]), Err(ShapeError::Empty));
    }

    #[test]
    fn should_reject_wrong_sample_count() {
        assert_eq!(
            IntensityGrid::new(2, 2, vec![1, 2, 3]),
            Err(ShapeError::DataLength {
                rows: 2,
                cols: 2,
                len: 3
            })
        );
    }

    #[test]
    fn should_narrow_wide_samples() {
        let grid = IntensityGrid::from_wide(1, 2, vec![-7, i64::from(i32::MAX)]).unwrap();
        assert_eq!(grid.samples(), &[-7, i32::MAX]);

        assert_eq!(
            IntensityGrid::from_wide(2, 2, vec![0, 1, 2, i64::from(i32::MIN) - 1]),
            Err(ShapeError::SampleOutOfRange {
                row: 1,
                col: 1,
                value: i64::from(i32::MIN) - 1
            })
        );
    }

    #[test]
    fn should_clip_into_8_bit_range() {
        let grid = IntensityGrid::from_rows(&[[-3, 0, 128], [255, 256, 1000]]).unwrap();
        let (clipped, count) = grid.clipped();

        assert_eq!(count, 3);
        assert_eq!(clipped.samples(), &[0, 0, 128, 255, 255, 255]);
        assert_eq!(grid.to_luma8(), vec![0, 0, 128, 255, 255, 255]);
    }

    #[test]
    fn should_replace_a_sample() {
        let mut grid = IntensityGrid::from_luma(2, 2, &[10, 20, 30, 40]).unwrap();

        assert_eq!(grid.set(1, 0, 31), Some(30));
        assert_eq!(grid.set(5, 0, 1), None);
        assert_eq!(grid.samples(), &[10, 20, 31, 40]);
    }
}
