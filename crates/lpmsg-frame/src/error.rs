use lpmsg_transport::TransportError;

/// Errors that can occur while encoding, decoding or sending a message.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The payload does not fit the length fields.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// The datagram ends before the framing says it should.
    #[error("truncated message ({len} bytes, need {needed})")]
    Truncated { len: usize, needed: usize },

    /// The total length field is not the payload length plus one.
    #[error("length fields disagree (total {total}, payload {payload})")]
    LengthMismatch { total: u16, payload: u8 },

    /// The datagram carries bytes past the framed payload.
    #[error("{0} trailing bytes after payload")]
    TrailingBytes(usize),

    /// The payload bytes are not valid UTF-8.
    #[error("payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// The encoded datagram could not be handed to the network.
    #[error("transmission failed: {0}")]
    Transmission(#[from] TransportError),
}

impl FrameError {
    /// True when the message was rejected before any transmission attempt.
    pub fn is_encoding(&self) -> bool {
        matches!(self, FrameError::PayloadTooLarge { .. })
    }

    /// True when encoding succeeded but the send itself failed.
    pub fn is_transmission(&self) -> bool {
        matches!(self, FrameError::Transmission(_))
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
