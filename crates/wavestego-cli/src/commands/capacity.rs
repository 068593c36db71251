use std::path::PathBuf;

use clap::Args;
use wavestego_core::media::{GridSource, ImageFile};
use wavestego_core::{CodecOptions, WaveletCodec};

use crate::CliResult;

/// Shows how much text an image can carry
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// Carrier image
    #[arg(short = 'i', long = "in", value_name = "carrier image", required = true)]
    pub media: PathBuf,
}

impl CapacityArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let grid = ImageFile::new(&self.media).read_grid()?;
        let (rows, cols) = grid.dimensions();
        let codec = WaveletCodec::new(options);

        println!("{cols}x{rows} pixels, {} bits", codec.capacity(rows, cols));
        match codec.max_message_len(rows, cols) {
            Some(len) => println!("up to {len} characters"),
            None => println!("too small for any message"),
        }

        Ok(())
    }
}
