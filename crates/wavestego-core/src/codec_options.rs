use crate::frame::{FramingMode, DEFAULT_MAX_MESSAGE_LEN};
use crate::transform::BandLayout;

/// Settings shared by hiding and unveiling.
///
/// Both sides have to agree on every field, nothing of it is stored
/// in the carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// decomposition and embedding bands
    pub layout: BandLayout,
    /// how the end of a frame is found when unveiling
    pub framing: FramingMode,
    /// ceiling for length prefixes, in characters
    pub max_message_len: u32,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            layout: BandLayout::default(),
            framing: FramingMode::default(),
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
        }
    }
}

impl CodecOptions {
    pub fn with_layout(mut self, layout: impl Into<BandLayout>) -> Self {
        self.layout = layout.into();
        self
    }

    pub fn with_framing(mut self, framing: FramingMode) -> Self {
        self.framing = framing;
        self
    }

    pub fn with_max_message_len(mut self, max_message_len: u32) -> Self {
        self.max_message_len = max_message_len;
        self
    }
}
