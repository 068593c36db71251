use std::path::Path;

use crate::codec_options::CodecOptions;
use crate::embedding::WaveletCodec;
use crate::frame::Unveiled;
use crate::media::{GridSource, ImageFile};
use crate::SteganoError;

pub fn prepare() -> UnveilApi {
    UnveilApi::default()
}

#[derive(Default, Debug)]
pub struct UnveilApi {
    secret_media: Option<Box<dyn GridSource>>,
    options: CodecOptions,
}

impl UnveilApi {
    /// Use the given codec options, they have to match the ones used for hiding
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// This is the secret image that contains the message to be unveiled
    pub fn from_secret_file(self, secret_image: impl AsRef<Path>) -> Self {
        self.with_source(ImageFile::new(secret_image))
    }

    /// Unveil from any other source, for example an in memory grid
    pub fn with_source(mut self, source: impl GridSource + 'static) -> Self {
        self.secret_media = Some(Box::new(source));
        self
    }

    /// Execute the unveil process and blocks until it is finished
    pub fn execute(self) -> Result<Unveiled, SteganoError> {
        let Some(mut secret_media) = self.secret_media else {
            return Err(SteganoError::CarrierNotSet);
        };

        let grid = secret_media.read_grid()?;
        WaveletCodec::new(self.options).unveil(&grid)
    }
}
