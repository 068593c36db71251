use std::path::PathBuf;

use clap::Args;
use wavestego_core::CodecOptions;

use crate::CliResult;

/// Unveils a text message from a PNG image
#[derive(Args, Debug)]
pub struct UnveilArgs {
    /// Source image that contains the secret message
    #[arg(
        short = 'i',
        long = "in",
        value_name = "image source file",
        required = true
    )]
    pub media: PathBuf,
}

impl UnveilArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let unveiled = wavestego_core::api::unveil::prepare()
            .with_options(options)
            .from_secret_file(&self.media)
            .execute()?;

        println!("{}", unveiled.message);

        Ok(())
    }
}
