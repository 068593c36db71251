use thiserror::Error;

use crate::transform::Band;

#[derive(Error, Debug)]
pub enum SteganoError {
    /// Represents a message whose frame needs more bits than the carrier offers.
    /// Raised before any coefficient is touched.
    #[error("Capacity Error: the message frame needs {required} bits but the carrier only offers {available}")]
    Capacity { required: usize, available: usize },

    /// Represents a malformed or truncated bitstream, or a message that cannot be framed
    #[error("Framing Error: {0}")]
    Framing(#[from] FramingError),

    /// Represents grids or bands whose dimensions do not fit together
    #[error("Shape Error: {0}")]
    Shape(#[from] ShapeError),

    /// Represents a stego grid whose 8 bit clipping destroyed hidden bits.
    /// Raised before anything is written to the target.
    #[error("Clipping Error: {clipped} samples were clipped to the 8 bit range and the message did not survive")]
    ClippedPayload { clipped: usize },

    /// Represents an unsupported carrier media. For example, a WAV file
    #[error("Media format is not supported")]
    UnsupportedMedia,

    /// Represents an invalid carrier image media. For example, a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents a target format that would destroy the least significant bits, like JPEG
    #[error("Lossy format `{0}` destroys hidden data, use a lossless format like PNG")]
    LossyCarrierFormat(String),

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No carrier media set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("API Error: Missing message")]
    MissingMessage,
}

/// Failures of the frame codec, on either side of the bitstream.
#[derive(Error, Debug)]
pub enum FramingError {
    /// Fewer bits than the 32 bit length prefix were available
    #[error("bitstream ends after {available} bits, before the 32 bit length prefix is complete")]
    TruncatedPrefix { available: usize },

    /// The length prefix reads zero, no message is present
    #[error("length prefix is zero, no message found")]
    EmptyMessage,

    /// The length prefix is beyond the sanity ceiling, most likely garbage
    #[error("length prefix {length} exceeds the ceiling of {ceiling} characters")]
    LengthExceedsCeiling { length: u64, ceiling: u32 },

    /// The payload ended before the announced number of bits
    #[error("payload needs {expected} bits but only {available} are available")]
    TruncatedPayload { expected: usize, available: usize },

    /// Delimiter scan found no end marker
    #[error("no end marker found in the bitstream")]
    MissingEndMarker,

    /// Delimiter scan found an end marker that does not close a whole byte
    #[error("{bits} payload bits before the end marker do not form whole bytes")]
    MisalignedPayload { bits: usize },

    /// Delimiter scan found a payload that disagrees with the length prefix
    #[error("length prefix announces {declared} characters but {found} precede the end marker")]
    LengthMismatch { declared: u32, found: usize },

    /// The message contains a character outside of printable ASCII (32..=126)
    #[error("character {character:?} at position {position} is not printable ASCII")]
    UnprintableCharacter { position: usize, character: char },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failures caused by grid or band dimensions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("grid has no samples")]
    Empty,

    #[error("row {row} has {found} samples, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{len} samples do not fill a {rows}x{cols} grid")]
    DataLength { rows: usize, cols: usize, len: usize },

    #[error("grids differ in shape: {left:?} vs {right:?}")]
    Mismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("band {0:?} is missing")]
    MissingBand(Band),

    #[error("band {band:?} is {found:?} but {expected:?} is required")]
    BandShape {
        band: Band,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("reconstructed sample {value} at ({row}, {col}) does not fit into i32")]
    SampleOutOfRange { row: usize, col: usize, value: i64 },
}
