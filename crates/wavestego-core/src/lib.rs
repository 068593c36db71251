//! # Wavestego Core API
//!
//! Hides short text messages in the integer Haar wavelet coefficients of a
//! grayscale image. The transform is an exact integer lifting scheme, so every
//! coefficient bit that is written can be read back from the stego image.
//!
//! The main pieces are
//! - [`WaveletCodec`][codec] for hiding in and unveiling from an [`IntensityGrid`]
//! - [`FrameCodec`][frame] for turning text into a self delimiting bitstream
//! - [`BandLayout`][layout] for choosing how a grid is decomposed
//! - [`api::hide`] and [`api::unveil`] for doing all of the above with image files
//!
//! # Usage Examples
//!
//! ## Hide and unveil in memory
//!
//! ```rust
//! use wavestego_core::media::synthetic;
//! use wavestego_core::{CodecOptions, WaveletCodec};
//!
//! let carrier = synthetic::apple(64, 64, 7).expect("Cannot render carrier");
//! let codec = WaveletCodec::new(CodecOptions::default());
//!
//! let embedded = codec.hide(&carrier, "Hello World!").expect("Cannot hide message");
//! let unveiled = codec.unveil(&embedded.grid).expect("Cannot unveil message");
//!
//! assert_eq!(unveiled.message, "Hello World!");
//! ```
//!
//! ## Hide a message inside an image file
//!
//! ```rust
//! use tempfile::tempdir;
//! use wavestego_core::media::{synthetic, GridSink, ImageFile};
//!
//! let temp_dir = tempdir().expect("Failed to create temporary directory");
//! let carrier = temp_dir.path().join("apple.png");
//! let secret = temp_dir.path().join("apple-with-secret.png");
//! ImageFile::new(&carrier)
//!     .write_grid(&synthetic::apple(128, 128, 1).expect("Cannot render carrier"))
//!     .expect("Cannot write carrier");
//!
//! let report = wavestego_core::api::hide::prepare()
//!     .with_message("Hello, World!")
//!     .with_image(&carrier)
//!     .with_output(&secret)
//!     .execute()
//!     .expect("Failed to hide message in image");
//! println!("PSNR {:.2} dB", report.quality.psnr);
//!
//! let unveiled = wavestego_core::api::unveil::prepare()
//!     .from_secret_file(&secret)
//!     .execute()
//!     .expect("Failed to unveil message from image");
//! assert_eq!(unveiled.message, "Hello, World!");
//! ```
//!
//! [codec]: ./embedding/struct.WaveletCodec.html
//! [frame]: ./frame/struct.FrameCodec.html
//! [layout]: ./transform/enum.BandLayout.html

#![warn(clippy::redundant_else)]

pub mod api;
pub mod bit_iterator;
pub mod codec_options;
pub mod embedding;
pub mod error;
pub mod frame;
pub mod grid;
pub mod media;
pub mod quality;
pub mod result;
pub mod transform;

pub use crate::bit_iterator::BitIterator;
pub use crate::codec_options::CodecOptions;
pub use crate::embedding::{Embedded, WaveletCodec};
pub use crate::error::{FramingError, ShapeError, SteganoError};
pub use crate::frame::{FrameCodec, FramingMode, Unveiled};
pub use crate::grid::IntensityGrid;
pub use crate::quality::QualityReport;
pub use crate::result::Result;
pub use crate::transform::{Band, BandLayout, Decompose, FlatLayout, FourBandLayout};
