use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};

/// Frame header: total length (2) + payload length (1) = 3 bytes.
pub const HEADER_SIZE: usize = 3;

/// Largest payload the header can describe.
///
/// The payload length field is one byte, and the total length field carries
/// the payload length plus one, so both stay within a single byte's range.
pub const MAX_PAYLOAD: usize = u8::MAX as usize - 1;

/// A text message as it exists just before encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    text: String,
}

impl Message {
    /// Create a new message.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte length of the UTF-8 payload.
    pub fn payload_len(&self) -> usize {
        self.text.len()
    }

    /// Value carried in the total length field: payload bytes plus one.
    pub fn length(&self) -> usize {
        self.payload_len() + 1
    }

    /// The total wire size of this message (header + payload).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.payload_len()
    }

    /// Encode this message into a fresh buffer.
    pub fn encode(&self) -> Result<Bytes> {
        encode(&self.text)
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Encode `s` into a new buffer.
pub fn encode(s: &str) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(HEADER_SIZE + s.len());
    encode_message(s, &mut buf)?;
    Ok(buf.freeze())
}

/// Append the framed form of `s` to `dst`.
///
/// Wire format:
/// ```text
/// ┌──────────────────┬──────────────┬─────────────────────┐
/// │ Total length     │ Payload len  │ Payload             │
/// │ (2B BE, n + 1)   │ (1B, n)      │ (n bytes, UTF-8)    │
/// └──────────────────┴──────────────┴─────────────────────┘
/// ```
///
/// `dst` is left untouched when the payload is too large.
pub fn encode_message(s: &str, dst: &mut BytesMut) -> Result<()> {
    let payload = s.as_bytes();
    if payload.len() > MAX_PAYLOAD {
        return Err(FrameError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_PAYLOAD,
        });
    }
    dst.reserve(HEADER_SIZE + payload.len());
    dst.put_u16(payload.len() as u16 + 1);
    dst.put_u8(payload.len() as u8);
    dst.put_slice(payload);
    Ok(())
}

/// Decode one complete datagram back into a message.
///
/// The datagram must hold exactly one frame: short input, inconsistent
/// length fields and trailing bytes are all errors.
pub fn decode_message(src: &[u8]) -> Result<Message> {
    if src.len() < HEADER_SIZE {
        return Err(FrameError::Truncated {
            len: src.len(),
            needed: HEADER_SIZE,
        });
    }

    let total = u16::from_be_bytes([src[0], src[1]]);
    let payload_len = src[2];

    if usize::from(total) != usize::from(payload_len) + 1 {
        return Err(FrameError::LengthMismatch {
            total,
            payload: payload_len,
        });
    }

    let needed = HEADER_SIZE + usize::from(payload_len);
    if src.len() < needed {
        return Err(FrameError::Truncated {
            len: src.len(),
            needed,
        });
    }
    if src.len() > needed {
        return Err(FrameError::TrailingBytes(src.len() - needed));
    }

    let text = std::str::from_utf8(&src[HEADER_SIZE..needed])?;
    Ok(Message::new(text))
}

/// Configuration for message encoding.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum payload size in bytes. Default and ceiling: [`MAX_PAYLOAD`].
    pub max_payload_size: usize,
}

impl FrameConfig {
    /// The limit actually enforced; values above [`MAX_PAYLOAD`] are clamped.
    pub fn effective_max_payload(&self) -> usize {
        self.max_payload_size.min(MAX_PAYLOAD)
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_payload_size: MAX_PAYLOAD,
        }
    }
}
