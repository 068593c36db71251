use crate::error::ShapeError;

/// Names the output arrays of one decomposition level.
///
/// The flat layout produces `Detail` and `Approximation`, the four band
/// layout produces `LowHigh`, `HighLow`, `HighHigh` and `LowLow`, where the
/// first letter names the row pass and the second the column pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Approximation,
    Detail,
    LowLow,
    LowHigh,
    HighLow,
    HighHigh,
}

/// One coefficient band, a row-major 2D integer array.
///
/// Only the leading `usable_rows` x `usable_cols` coefficients derive from
/// real samples on both lifting passes. Coefficients of pairs that include an
/// edge padding sample are lost when the inverse crops the padding away, so
/// they do not count as embedding positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subband {
    band: Band,
    rows: usize,
    cols: usize,
    coefficients: Vec<i64>,
    usable_rows: usize,
    usable_cols: usize,
}

impl Subband {
    pub(crate) fn new(
        band: Band,
        (rows, cols): (usize, usize),
        coefficients: Vec<i64>,
        (usable_rows, usable_cols): (usize, usize),
    ) -> Self {
        debug_assert_eq!(coefficients.len(), rows * cols);
        Self {
            band,
            rows,
            cols,
            coefficients,
            usable_rows: usable_rows.min(rows),
            usable_cols: usable_cols.min(cols),
        }
    }

    pub fn band(&self) -> Band {
        self.band
    }

    /// (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<i64> {
        if row < self.rows && col < self.cols {
            self.coefficients.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    pub fn coefficients(&self) -> &[i64] {
        &self.coefficients
    }

    pub fn coefficients_mut(&mut self) -> &mut [i64] {
        &mut self.coefficients
    }

    /// number of coefficients that can carry a bit
    pub fn usable_positions(&self) -> usize {
        self.usable_rows * self.usable_cols
    }

    /// usable coefficients, row-major
    pub fn usable(&self) -> impl Iterator<Item = &i64> + '_ {
        let usable_cols = self.usable_cols;
        self.coefficients
            .chunks(self.cols.max(1))
            .take(self.usable_rows)
            .flat_map(move |row| row.iter().take(usable_cols))
    }

    /// usable coefficients, row-major, mutable
    pub fn usable_mut(&mut self) -> impl Iterator<Item = &mut i64> + '_ {
        let usable_cols = self.usable_cols;
        self.coefficients
            .chunks_mut(self.cols.max(1))
            .take(self.usable_rows)
            .flat_map(move |row| row.iter_mut().take(usable_cols))
    }
}

/// The output of one decomposition level.
///
/// Subbands are kept in canonical embedding sequence: detail bands first,
/// the approximation band last. The total coefficient count equals the sample
/// count of the edge padded input grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoefficientBands {
    rows: usize,
    cols: usize,
    subbands: Vec<Subband>,
}

impl CoefficientBands {
    pub(crate) fn new(rows: usize, cols: usize, subbands: Vec<Subband>) -> Self {
        Self {
            rows,
            cols,
            subbands,
        }
    }

    /// dimensions of the grid before padding, (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn subbands(&self) -> &[Subband] {
        &self.subbands
    }

    pub fn subband(&self, band: Band) -> Option<&Subband> {
        self.subbands.iter().find(|s| s.band == band)
    }

    pub fn subband_mut(&mut self, band: Band) -> Option<&mut Subband> {
        self.subbands.iter_mut().find(|s| s.band == band)
    }

    pub fn coefficient_count(&self) -> usize {
        self.subbands.iter().map(|s| s.coefficients.len()).sum()
    }

    /// Embedding positions of the given bands, in canonical order:
    /// subband sequence first, row-major within each subband.
    pub fn positions<'a>(&'a self, bands: &'a [Band]) -> impl Iterator<Item = &'a i64> + 'a {
        self.subbands
            .iter()
            .filter(move |s| bands.contains(&s.band))
            .flat_map(|s| s.usable())
    }

    /// mutable counterpart of [`CoefficientBands::positions`]
    pub fn positions_mut<'a>(
        &'a mut self,
        bands: &'a [Band],
    ) -> impl Iterator<Item = &'a mut i64> + 'a {
        self.subbands
            .iter_mut()
            .filter(move |s| bands.contains(&s.band))
            .flat_map(|s| s.usable_mut())
    }

    /// coefficients of `band`, checked against the expected dimensions
    pub(crate) fn band_checked(
        &self,
        band: Band,
        expected: (usize, usize),
    ) -> Result<&[i64], ShapeError> {
        let subband = self.subband(band).ok_or(ShapeError::MissingBand(band))?;
        if subband.dimensions() != expected {
            return Err(ShapeError::BandShape {
                band,
                expected,
                found: subband.dimensions(),
            });
        }

        Ok(subband.coefficients())
    }
}
