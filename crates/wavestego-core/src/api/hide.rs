use std::path::Path;

use log::{error, info, warn};

use crate::codec_options::CodecOptions;
use crate::embedding::WaveletCodec;
use crate::media::{GridSink, GridSource, ImageFile};
use crate::quality::QualityReport;
use crate::SteganoError;

pub fn prepare() -> HideApi {
    HideApi::default()
}

/// What hiding a message did to the carrier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HideReport {
    /// embedding positions the carrier offers
    pub capacity_bits: usize,
    /// positions the message frame occupies
    pub frame_bits: usize,
    /// samples that left [0, 255] and had to be clamped
    pub clipped_samples: usize,
    /// carrier versus the grid handed to the sink
    pub quality: QualityReport,
}

#[derive(Default, Debug)]
pub struct HideApi {
    message: Option<String>,
    source: Option<Box<dyn GridSource>>,
    sink: Option<Box<dyn GridSink>>,
    options: CodecOptions,
}

impl HideApi {
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn use_message<S: AsRef<str>>(mut self, message: Option<S>) -> Self {
        self.message = message.map(|s| s.as_ref().to_string());
        self
    }

    /// carrier image file to read
    pub fn with_image<A: AsRef<Path>>(self, image: A) -> Self {
        self.with_source(ImageFile::new(image))
    }

    /// any other carrier source, for example an in memory grid
    pub fn with_source(mut self, source: impl GridSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// target image file, has to be lossless
    pub fn with_output<A: AsRef<Path>>(self, output: A) -> Self {
        self.with_sink(ImageFile::new(output))
    }

    pub fn with_sink(mut self, sink: impl GridSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Hides the message and hands the stego grid to the sink.
    ///
    /// A stego grid that needs clipping is unveiled again before it is written,
    /// it fails with [`SteganoError::ClippedPayload`] if the message is lost.
    /// Nothing reaches the sink when any step fails.
    pub fn execute(self) -> Result<HideReport, SteganoError> {
        let Some(message) = self.message else {
            return Err(SteganoError::MissingMessage);
        };
        let Some(mut source) = self.source else {
            return Err(SteganoError::CarrierNotSet);
        };
        let Some(mut sink) = self.sink else {
            return Err(SteganoError::TargetNotSet);
        };

        let carrier = source.read_grid()?;
        let codec = WaveletCodec::new(self.options);
        let embedded = codec.hide(&carrier, &message)?;
        let (stego, clipped_samples) = embedded.grid.clipped();
        if clipped_samples > 0 {
            warn!("{clipped_samples} samples were clipped to [0, 255]");
            let survived = matches!(
                codec.unveil(&stego),
                Ok(ref unveiled) if unveiled.is_clean() && unveiled.message == message
            );
            if !survived {
                error!("clipping destroyed the hidden message, nothing was written");
                return Err(SteganoError::ClippedPayload {
                    clipped: clipped_samples,
                });
            }
        }
        let quality = QualityReport::measure(&carrier, &stego)?;

        sink.write_grid(&stego)?;
        info!(
            "hid {} of {} bits, PSNR {:.2} dB",
            embedded.frame_bits, embedded.capacity_bits, quality.psnr
        );

        Ok(HideReport {
            capacity_bits: embedded.capacity_bits,
            frame_bits: embedded.frame_bits,
            clipped_samples,
            quality,
        })
    }
}
