use clap::{Parser, Subcommand, ValueEnum};
use wavestego_core::frame::DEFAULT_MAX_MESSAGE_LEN;
use wavestego_core::{BandLayout, CodecOptions, FlatLayout, FourBandLayout, FramingMode};

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// How the image is decomposed, has to match between hide and unveil
    #[arg(long, value_enum, global = true, default_value = "four-band")]
    pub layout: LayoutArg,

    /// How the end of the message is found when unveiling
    #[arg(long, value_enum, global = true, default_value = "length-prefixed")]
    pub framing: FramingArg,

    /// Longest message length accepted from a length prefix
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_MESSAGE_LEN)]
    pub max_message_len: u32,

    #[command(subcommand)]
    pub command: Commands,
}

impl CliArgs {
    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions::default()
            .with_layout(self.layout)
            .with_framing(self.framing.into())
            .with_max_message_len(self.max_message_len)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Hide(hide::HideArgs),
    Unveil(unveil::UnveilArgs),
    Capacity(capacity::CapacityArgs),
    Psnr(psnr::PsnrArgs),
    Synth(synth::SynthArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutArg {
    /// pairs neighbouring samples of the flattened image, hides in the detail band
    Flat,
    /// 2D decomposition into four bands, hides in all of them
    FourBand,
}

impl From<LayoutArg> for BandLayout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Flat => FlatLayout.into(),
            LayoutArg::FourBand => FourBandLayout.into(),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramingArg {
    /// trust the length prefix
    LengthPrefixed,
    /// scan for the end marker
    DelimiterScan,
}

impl From<FramingArg> for FramingMode {
    fn from(value: FramingArg) -> Self {
        match value {
            FramingArg::LengthPrefixed => FramingMode::LengthPrefixed,
            FramingArg::DelimiterScan => FramingMode::DelimiterScan,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn should_map_flags_onto_codec_options() {
        let args = CliArgs::parse_from([
            "wavestego",
            "--layout",
            "flat",
            "--framing",
            "delimiter-scan",
            "--max-message-len",
            "64",
            "unveil",
            "-i",
            "secret.png",
        ]);
        let options = args.codec_options();

        assert_eq!(options.layout, BandLayout::Flat(FlatLayout));
        assert_eq!(options.framing, FramingMode::DelimiterScan);
        assert_eq!(options.max_message_len, 64);
    }

    #[test]
    fn should_default_to_four_bands_and_length_prefix() {
        let args = CliArgs::parse_from(["wavestego", "capacity", "-i", "carrier.png"]);

        assert_eq!(args.codec_options(), CodecOptions::default());
    }
}
