use std::path::PathBuf;

use clap::Args;
use wavestego_core::CodecOptions;

use crate::CliResult;

/// Hides a text message in a grayscale PNG image
#[derive(Args, Debug)]
pub struct HideArgs {
    /// Carrier image, PNG or JPEG, used readonly.
    #[arg(short = 'i', long = "in", value_name = "carrier image", required = true)]
    pub media: PathBuf,

    /// Final image will be stored as PNG file
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output image file",
        required = true
    )]
    pub write_to_file: PathBuf,

    /// A text message of printable ASCII characters that will be hidden
    #[arg(short, long, value_name = "text message", required = true)]
    pub message: String,
}

impl HideArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let report = wavestego_core::api::hide::prepare()
            .with_options(options)
            .with_message(&self.message)
            .with_image(&self.media)
            .with_output(&self.write_to_file)
            .execute()?;

        println!(
            "Hidden {} of {} available bits, PSNR {:.2} dB",
            report.frame_bits, report.capacity_bits, report.quality.psnr
        );
        if report.clipped_samples > 0 {
            println!(
                "{} samples were clipped, the message was verified to survive",
                report.clipped_samples
            );
        }

        Ok(())
    }
}
