//! Length-prefixed text message framing.
//!
//! Every message is one datagram framed with:
//! - A 2-byte big-endian total length (payload length + 1)
//! - A 1-byte payload length
//! - The UTF-8 payload bytes
//!
//! Payloads that cannot be represented by the length fields are rejected
//! before anything reaches the network.

pub mod codec;
pub mod error;
pub mod writer;

pub use codec::{
    decode_message, encode, encode_message, FrameConfig, Message, HEADER_SIZE, MAX_PAYLOAD,
};
pub use error::{FrameError, Result};
pub use writer::MessageWriter;
