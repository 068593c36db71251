//! Places frame bits onto wavelet coefficients and reads them back.
//!
//! Positions are visited in the canonical order of the layout's embedding
//! bands, row-major within each band. Hiding replaces the least significant
//! bit of one coefficient per frame bit and never touches a position past the
//! last frame bit.

mod positions;

pub use positions::{CoefficientReader, CoefficientWriter, HideBit, UnveilBit};

use log::{debug, warn};
use std::io::Write;

use crate::codec_options::CodecOptions;
use crate::error::SteganoError;
use crate::frame::{
    EndMarkerScanner, FrameCodec, FramingMode, Unveiled, FRAME_OVERHEAD_BITS,
};
use crate::grid::IntensityGrid;
use crate::result::Result;
use crate::transform::Decompose;

/// The outcome of hiding a message in a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embedded {
    /// stego grid, not yet clipped to the 8 bit range
    pub grid: IntensityGrid,
    /// bits the frame occupies
    pub frame_bits: usize,
    /// embedding positions the carrier offers
    pub capacity_bits: usize,
}

/// Hides text in the coefficients of an integer Haar decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WaveletCodec {
    options: CodecOptions,
}

impl WaveletCodec {
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// number of bits a `rows` x `cols` carrier can take
    pub fn capacity(&self, rows: usize, cols: usize) -> usize {
        self.options.layout.capacity(rows, cols)
    }

    /// Longest message in characters that fits into a `rows` x `cols` carrier,
    /// `None` if not even an empty frame fits.
    pub fn max_message_len(&self, rows: usize, cols: usize) -> Option<usize> {
        let capacity = self.capacity(rows, cols);
        capacity
            .checked_sub(FRAME_OVERHEAD_BITS)
            .map(|payload_bits| (payload_bits / 8).min(self.options.max_message_len as usize))
    }

    fn frame_codec(&self) -> FrameCodec {
        FrameCodec::new(self.options.max_message_len)
    }

    /// Hides `message` in a copy of `carrier`.
    ///
    /// Fails with [`SteganoError::Capacity`] before anything is modified if the
    /// frame needs more bits than the carrier offers.
    pub fn hide(&self, carrier: &IntensityGrid, message: &str) -> Result<Embedded> {
        let layout = self.options.layout;
        let frame = self.frame_codec().encode(message)?;
        let (rows, cols) = carrier.dimensions();
        let capacity_bits = layout.capacity(rows, cols);
        if frame.bit_len() > capacity_bits {
            return Err(SteganoError::Capacity {
                required: frame.bit_len(),
                available: capacity_bits,
            });
        }
        debug!(
            "hiding {} bits in {rows}x{cols} carrier with capacity of {capacity_bits} bits",
            frame.bit_len()
        );

        let mut bands = layout.forward(carrier);
        {
            let mut writer = CoefficientWriter::new(bands.positions_mut(layout.embedding_bands()));
            writer.write_all(frame.as_bytes())?;
            debug!("{} bits hidden", writer.hidden_bits());
        }

        let grid = layout.inverse(&bands)?;

        Ok(Embedded {
            grid,
            frame_bits: frame.bit_len(),
            capacity_bits,
        })
    }

    /// Recovers the message hidden in `grid`.
    pub fn unveil(&self, grid: &IntensityGrid) -> Result<Unveiled> {
        let layout = self.options.layout;
        let codec = self.frame_codec();
        let bands = layout.forward(grid);
        let positions = bands.positions(layout.embedding_bands());

        let unveiled = match self.options.framing {
            FramingMode::LengthPrefixed => codec.decode(&mut CoefficientReader::new(positions))?,
            FramingMode::DelimiterScan => {
                let max_bits = FRAME_OVERHEAD_BITS + codec.max_message_len() as usize * 8;
                let mut scanner = EndMarkerScanner::default();
                let mut bits = Vec::new();
                for bit in positions.map(UnveilBit::unveil_bit).take(max_bits) {
                    bits.push(bit);
                    if scanner.push(bit) {
                        break;
                    }
                }
                debug!("scanned {} bits for the end marker", scanner.seen());
                codec.decode_delimited(&bits)?
            }
        };

        if !unveiled.is_clean() {
            warn!(
                "{} characters of the hidden message were not printable",
                unveiled.skipped.len()
            );
        }

        Ok(unveiled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FramingError;
    use crate::transform::{Band, BandLayout, FlatLayout, FourBandLayout};

    fn carrier(rows: usize, cols: usize, seed: u64) -> IntensityGrid {
        let mut rng = fastrand::Rng::with_seed(seed);
        IntensityGrid::from_fn(rows, cols, |_, _| rng.i32(60..190)).unwrap()
    }

    fn codecs() -> Vec<WaveletCodec> {
        let mut codecs = Vec::new();
        for layout in [BandLayout::from(FlatLayout), FourBandLayout.into()] {
            for framing in [FramingMode::LengthPrefixed, FramingMode::DelimiterScan] {
                codecs.push(WaveletCodec::new(
                    CodecOptions::default()
                        .with_layout(layout)
                        .with_framing(framing),
                ));
            }
        }
        codecs
    }

    #[test]
    fn should_unveil_what_was_hidden() {
        let carrier = carrier(32, 32, 1);
        for codec in codecs() {
            let embedded = codec.hide(&carrier, "Wavelets hide things!").unwrap();
            let unveiled = codec.unveil(&embedded.grid).unwrap();

            assert_eq!(unveiled.message, "Wavelets hide things!", "{codec:?}");
            assert!(unveiled.is_clean());
            assert_eq!(embedded.frame_bits, 48 + 21 * 8);
        }
    }

    #[test]
    fn should_hide_the_frame_bits_in_place() {
        let carrier = carrier(16, 16, 7);
        let codec = WaveletCodec::default();
        let frame = FrameCodec::default().encode("bits").unwrap();

        let embedded = codec.hide(&carrier, "bits").unwrap();
        let hidden: Vec<bool> = FourBandLayout
            .forward(&embedded.grid)
            .positions(FourBandLayout.embedding_bands())
            .take(embedded.frame_bits)
            .map(UnveilBit::unveil_bit)
            .collect();

        assert_eq!(hidden, frame.bits().collect::<Vec<_>>());
        assert_eq!(embedded.capacity_bits, 256);
    }

    #[test]
    fn should_reject_a_4x4_carrier_even_for_an_empty_message() {
        let carrier = IntensityGrid::from_fn(4, 4, |r, c| 10 + (r * 4 + c) as i32).unwrap();
        let codec = WaveletCodec::default();

        assert!(matches!(
            codec.hide(&carrier, ""),
            Err(SteganoError::Capacity {
                required: 48,
                available: 16
            })
        ));
        assert!(matches!(
            codec.hide(&carrier, "Hi"),
            Err(SteganoError::Capacity {
                required: 64,
                available: 16
            })
        ));
        assert_eq!(codec.max_message_len(4, 4), None);
    }

    #[test]
    fn should_fill_the_capacity_exactly() {
        // 8x8 four bands offers 64 positions, "Hi" frames to 64 bits
        let carrier = carrier(8, 8, 2);
        let codec = WaveletCodec::default();

        let embedded = codec.hide(&carrier, "Hi").unwrap();
        assert_eq!(embedded.frame_bits, embedded.capacity_bits);
        assert_eq!(codec.unveil(&embedded.grid).unwrap().message, "Hi");
        assert!(matches!(
            codec.hide(&carrier, "Hi!"),
            Err(SteganoError::Capacity {
                required: 72,
                available: 64
            })
        ));
    }

    #[test]
    fn should_report_the_longest_message() {
        let codec = WaveletCodec::default();
        assert_eq!(codec.max_message_len(8, 8), Some(2));
        assert_eq!(codec.max_message_len(256, 256), Some(8186));

        let capped = WaveletCodec::new(CodecOptions::default().with_max_message_len(100));
        assert_eq!(capped.max_message_len(256, 256), Some(100));

        let flat = WaveletCodec::new(CodecOptions::default().with_layout(FlatLayout));
        assert_eq!(flat.capacity(8, 16), 64);
        assert_eq!(flat.max_message_len(8, 16), Some(2));
    }

    #[test]
    fn should_survive_odd_dimensions() {
        let carrier = carrier(33, 47, 3);
        for codec in codecs() {
            let embedded = codec.hide(&carrier, "odd shapes lose no bits").unwrap();

            assert_eq!(embedded.grid.dimensions(), (33, 47));
            assert_eq!(
                codec.unveil(&embedded.grid).unwrap().message,
                "odd shapes lose no bits",
                "{codec:?}"
            );
        }
    }

    #[test]
    fn should_touch_detail_coefficients_only_for_short_messages() {
        let carrier = carrier(16, 16, 4);
        let codec = WaveletCodec::default();
        let embedded = codec.hide(&carrier, "tiny").unwrap();

        let before = FourBandLayout.forward(&carrier);
        let after = FourBandLayout.forward(&embedded.grid);
        assert_eq!(
            before.subband(Band::LowLow),
            after.subband(Band::LowLow),
            "approximation band was modified"
        );
        let changed = before
            .positions(FourBandLayout.embedding_bands())
            .zip(after.positions(FourBandLayout.embedding_bands()))
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| i)
            .max();
        assert!(changed.is_some_and(|last| last < embedded.frame_bits));
    }

    #[test]
    fn should_fail_on_a_clean_carrier() {
        let carrier = IntensityGrid::from_fn(16, 16, |_, _| 128).unwrap();

        assert!(matches!(
            WaveletCodec::default().unveil(&carrier),
            Err(SteganoError::Framing(FramingError::EmptyMessage))
        ));
        let scanning =
            WaveletCodec::new(CodecOptions::default().with_framing(FramingMode::DelimiterScan));
        assert!(matches!(
            scanning.unveil(&carrier),
            Err(SteganoError::Framing(FramingError::MissingEndMarker))
        ));
    }

    #[test]
    fn should_reject_unprintable_messages_before_touching_the_carrier() {
        let carrier = carrier(16, 16, 5);

        assert!(matches!(
            WaveletCodec::default().hide(&carrier, "tab\there"),
            Err(SteganoError::Framing(FramingError::UnprintableCharacter { .. }))
        ));
    }

    #[test]
    fn should_not_unveil_with_another_layout() {
        let carrier = carrier(32, 32, 6);
        let embedded = WaveletCodec::default().hide(&carrier, "secret").unwrap();
        let flat = WaveletCodec::new(CodecOptions::default().with_layout(FlatLayout));

        let unveiled = flat.unveil(&embedded.grid);
        assert!(!matches!(unveiled, Ok(ref u) if u.message == "secret"));
    }
}
