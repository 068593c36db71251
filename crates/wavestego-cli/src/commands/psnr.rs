use std::path::PathBuf;

use clap::Args;
use wavestego_core::media::{GridSource, ImageFile};
use wavestego_core::QualityReport;

use crate::CliResult;

/// Compares a carrier image with its stego image
#[derive(Args, Debug)]
pub struct PsnrArgs {
    /// The carrier image before hiding
    #[arg(long, value_name = "original image", required = true)]
    pub original: PathBuf,

    /// The image with the hidden message
    #[arg(long, value_name = "stego image", required = true)]
    pub stego: PathBuf,
}

impl PsnrArgs {
    pub fn run(self) -> CliResult<()> {
        let original = ImageFile::new(&self.original).read_grid()?;
        let stego = ImageFile::new(&self.stego).read_grid()?;
        let report = QualityReport::measure(&original, &stego)?;

        if report.is_lossless() {
            println!("PSNR: inf, images are identical");
        } else {
            println!("PSNR: {:.2} dB", report.psnr);
            println!("MSE: {:.6}", report.mse);
            println!(
                "{} samples changed, by at most {}",
                report.changed_samples, report.max_abs_difference
            );
        }

        Ok(())
    }
}
