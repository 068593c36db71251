use std::path::PathBuf;

use clap::Args;
use wavestego_core::media::{synthetic, GridSink, ImageFile};

use crate::CliResult;

/// Renders a synthetic apple carrier image
#[derive(Args, Debug)]
pub struct SynthArgs {
    /// Carrier will be stored as PNG file
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output image file",
        required = true
    )]
    pub write_to_file: PathBuf,

    #[arg(long, default_value_t = 256)]
    pub rows: usize,

    #[arg(long, default_value_t = 256)]
    pub cols: usize,

    /// Seed of the texture noise
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl SynthArgs {
    pub fn run(self) -> CliResult<()> {
        let grid = synthetic::apple(self.rows, self.cols, self.seed)?;
        ImageFile::new(&self.write_to_file).write_grid(&grid)?;

        println!(
            "Carrier of {}x{} pixels written to {}",
            self.cols,
            self.rows,
            self.write_to_file.display()
        );

        Ok(())
    }
}
