//! Self delimiting bitstream frames for text messages.
//!
//! ```text
//! [32 bits ] message length in characters (big-endian u32)
//! [8 bits  ] one group per character, ASCII code
//! ...
//! [16 bits ] end marker 0b1111_1111_1111_1110
//! ```
//!
//! The frame does not care where its bits end up, placing them onto
//! coefficients is the job of the embedding engine.
//!
//! With [`FramingMode::LengthPrefixed`] the prefix is authoritative and the end
//! marker is never read. With [`FramingMode::DelimiterScan`] the bitstream is
//! scanned for the end marker instead. That scan stops early whenever the
//! payload itself reproduces the marker pattern. Printable ASCII never carries
//! more than six consecutive one bits, so text messages framed by
//! [`FrameCodec::encode`] are not affected, foreign bitstreams can be.

use bitstream_io::{BitWrite, BitWriter};
use byteorder::{BigEndian, ByteOrder};
use log::{debug, warn};
use std::io::Read;
use std::ops::RangeInclusive;

use crate::bit_iterator::{BitCollector, BitIterator};
use crate::error::FramingError;

pub const LENGTH_PREFIX_BITS: usize = 32;
pub const END_MARKER: u16 = 0b1111_1111_1111_1110;
pub const END_MARKER_BITS: usize = 16;
/// bits a frame needs on top of its payload
pub const FRAME_OVERHEAD_BITS: usize = LENGTH_PREFIX_BITS + END_MARKER_BITS;
/// characters that survive a round trip
pub const PRINTABLE: RangeInclusive<u8> = 32..=126;
/// sanity ceiling for decoded length prefixes
pub const DEFAULT_MAX_MESSAGE_LEN: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FramingMode {
    /// read exactly as many payload bits as the length prefix announces
    #[default]
    LengthPrefixed,
    /// read until the end marker shows up
    DelimiterScan,
}

/// An encoded frame, always a whole number of bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitstreamFrame {
    bytes: Vec<u8>,
}

impl BitstreamFrame {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8
    }

    /// number of characters the frame carries
    pub fn payload_len(&self) -> usize {
        self.bytes.len() - FRAME_OVERHEAD_BITS / 8
    }

    pub fn bits(&self) -> BitIterator<&[u8]> {
        BitIterator::new(&self.bytes[..])
    }
}

/// A payload byte outside of [`PRINTABLE`] that was dropped while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedByte {
    /// index of the byte within the payload
    pub position: usize,
    pub code: u8,
}

/// The message recovered from a frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Unveiled {
    pub message: String,
    pub skipped: Vec<SkippedByte>,
}

impl Unveiled {
    /// true if no payload byte had to be dropped
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Incrementally watches a bitstream for the end marker.
///
/// The marker only counts when it starts after the length prefix.
#[derive(Debug, Default)]
pub struct EndMarkerScanner {
    window: u16,
    seen: usize,
}

impl EndMarkerScanner {
    /// feeds the next bit, returns true once the marker is complete
    pub fn push(&mut self, bit: bool) -> bool {
        self.window = (self.window << 1) | u16::from(bit);
        self.seen += 1;

        self.seen >= FRAME_OVERHEAD_BITS && self.window == END_MARKER
    }

    /// number of bits fed so far
    pub fn seen(&self) -> usize {
        self.seen
    }
}

/// Converts between text messages and [`BitstreamFrame`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCodec {
    max_message_len: u32,
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MESSAGE_LEN)
    }
}

impl FrameCodec {
    /// `max_message_len` is the sanity ceiling applied to length prefixes
    pub fn new(max_message_len: u32) -> Self {
        Self { max_message_len }
    }

    pub fn max_message_len(&self) -> u32 {
        self.max_message_len
    }

    /// Frames `message`.
    ///
    /// Fails if a character is not printable ASCII or the message is longer
    /// than the ceiling a decoder would accept. An empty message is framed,
    /// a decoder rejects it though.
    pub fn encode(&self, message: &str) -> Result<BitstreamFrame, FramingError> {
        if let Some((position, character)) = message
            .chars()
            .enumerate()
            .find(|(_, c)| !u8::try_from(*c).is_ok_and(|b| PRINTABLE.contains(&b)))
        {
            return Err(FramingError::UnprintableCharacter {
                position,
                character,
            });
        }

        let length = message.len();
        if length > self.max_message_len as usize {
            return Err(FramingError::LengthExceedsCeiling {
                length: length as u64,
                ceiling: self.max_message_len,
            });
        }

        let mut writer = BitWriter::endian(
            Vec::with_capacity(length + FRAME_OVERHEAD_BITS / 8),
            bitstream_io::BigEndian,
        );
        writer.write(LENGTH_PREFIX_BITS as u32, length as u32)?;
        for byte in message.bytes() {
            writer.write(8, byte)?;
        }
        writer.write(END_MARKER_BITS as u32, END_MARKER)?;

        let frame = BitstreamFrame {
            bytes: writer.into_writer(),
        };
        debug!("framed {length} characters into {} bits", frame.bit_len());

        Ok(frame)
    }

    /// Decodes a length prefixed frame.
    ///
    /// Reads exactly `4 + L` bytes from `reader`, where `L` is the length
    /// prefix, and never looks at the end marker.
    pub fn decode<R: Read>(&self, reader: &mut R) -> Result<Unveiled, FramingError> {
        let length = self.read_length(reader)?;
        let mut payload = Vec::with_capacity(length as usize);
        reader
            .by_ref()
            .take(u64::from(length))
            .read_to_end(&mut payload)?;

        if payload.len() < length as usize {
            return Err(FramingError::TruncatedPayload {
                expected: length as usize * 8,
                available: payload.len() * 8,
            });
        }

        Ok(self.to_text(&payload))
    }

    /// Decodes a frame by scanning `bits` for the end marker.
    ///
    /// The marker is searched from the end of the length prefix on, every bit
    /// before it is payload. The payload has to consist of whole bytes and
    /// agree with the length prefix.
    pub fn decode_delimited(&self, bits: &[bool]) -> Result<Unveiled, FramingError> {
        if bits.len() < LENGTH_PREFIX_BITS {
            return Err(FramingError::TruncatedPrefix {
                available: bits.len(),
            });
        }

        let mut scanner = EndMarkerScanner::default();
        let marker_end = bits
            .iter()
            .position(|&bit| scanner.push(bit))
            .ok_or(FramingError::MissingEndMarker)?;
        let payload_end = marker_end + 1 - END_MARKER_BITS;
        let payload_bits = payload_end - LENGTH_PREFIX_BITS;
        if payload_bits % 8 != 0 {
            return Err(FramingError::MisalignedPayload { bits: payload_bits });
        }

        let mut collector = BitCollector::default();
        for &bit in &bits[..payload_end] {
            collector.push(bit)?;
        }
        let bytes = collector.into_bytes()?;
        let (prefix, payload) = bytes.split_at(LENGTH_PREFIX_BITS / 8);

        let length = BigEndian::read_u32(prefix);
        self.check_length(length)?;
        if length as usize != payload.len() {
            return Err(FramingError::LengthMismatch {
                declared: length,
                found: payload.len(),
            });
        }

        Ok(self.to_text(payload))
    }

    /// reads and validates the 32 bit length prefix
    pub fn read_length<R: Read>(&self, reader: &mut R) -> Result<u32, FramingError> {
        let mut prefix = Vec::with_capacity(LENGTH_PREFIX_BITS / 8);
        reader
            .by_ref()
            .take((LENGTH_PREFIX_BITS / 8) as u64)
            .read_to_end(&mut prefix)?;

        if prefix.len() < LENGTH_PREFIX_BITS / 8 {
            return Err(FramingError::TruncatedPrefix {
                available: prefix.len() * 8,
            });
        }

        let length = BigEndian::read_u32(&prefix);
        self.check_length(length)?;
        debug!("length prefix announces {length} characters");

        Ok(length)
    }

    fn check_length(&self, length: u32) -> Result<(), FramingError> {
        if length == 0 {
            return Err(FramingError::EmptyMessage);
        }
        if length > self.max_message_len {
            return Err(FramingError::LengthExceedsCeiling {
                length: u64::from(length),
                ceiling: self.max_message_len,
            });
        }

        Ok(())
    }

    fn to_text(&self, payload: &[u8]) -> Unveiled {
        let mut unveiled = Unveiled {
            message: String::with_capacity(payload.len()),
            skipped: Vec::new(),
        };

        for (position, &code) in payload.iter().enumerate() {
            if PRINTABLE.contains(&code) {
                unveiled.message.push(char::from(code));
            } else {
                warn!("Skipping invalid character code {code} at position {position}");
                unveiled.skipped.push(SkippedByte { position, code });
            }
        }

        unveiled
    }
}
