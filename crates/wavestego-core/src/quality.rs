//! Distortion measures between a carrier and its stego grid.
//!
//! PSNR follows `20 * log10(255 / sqrt(mse))` and is `f64::INFINITY` for
//! identical grids.

use crate::error::ShapeError;
use crate::grid::IntensityGrid;

/// peak signal value of an 8 bit sample
pub const MAX_INTENSITY: f64 = 255.0;

fn check_shapes(original: &IntensityGrid, stego: &IntensityGrid) -> Result<(), ShapeError> {
    if original.dimensions() != stego.dimensions() {
        return Err(ShapeError::Mismatch {
            left: original.dimensions(),
            right: stego.dimensions(),
        });
    }
    Ok(())
}

/// mean squared sample difference
pub fn mse(original: &IntensityGrid, stego: &IntensityGrid) -> Result<f64, ShapeError> {
    check_shapes(original, stego)?;
    let sum: f64 = original
        .samples()
        .iter()
        .zip(stego.samples())
        .map(|(&a, &b)| {
            let diff = f64::from(a - b);
            diff * diff
        })
        .sum();

    Ok(sum / original.sample_count() as f64)
}

/// peak signal to noise ratio in decibels
pub fn psnr(original: &IntensityGrid, stego: &IntensityGrid) -> Result<f64, ShapeError> {
    Ok(psnr_from_mse(mse(original, stego)?))
}

fn psnr_from_mse(mse: f64) -> f64 {
    if mse == 0.0 {
        f64::INFINITY
    } else {
        20.0 * (MAX_INTENSITY / mse.sqrt()).log10()
    }
}

/// Summary of how far a stego grid drifted from its carrier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityReport {
    pub mse: f64,
    /// `f64::INFINITY` when nothing changed
    pub psnr: f64,
    pub changed_samples: usize,
    pub max_abs_difference: u32,
}

impl QualityReport {
    pub fn measure(original: &IntensityGrid, stego: &IntensityGrid) -> Result<Self, ShapeError> {
        let mse = mse(original, stego)?;
        let (changed_samples, max_abs_difference) = original
            .samples()
            .iter()
            .zip(stego.samples())
            .map(|(a, b)| a.abs_diff(*b))
            .filter(|&diff| diff > 0)
            .fold((0, 0), |(count, max), diff| (count + 1, max.max(diff)));

        Ok(Self {
            mse,
            psnr: psnr_from_mse(mse),
            changed_samples,
            max_abs_difference,
        })
    }

    pub fn is_lossless(&self) -> bool {
        self.changed_samples == 0
    }
}
