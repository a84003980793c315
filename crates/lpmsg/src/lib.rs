//! Send a length-prefixed text message as a single UDP datagram.
//!
//! # Crate Structure
//!
//! - [`transport`] — Destination addressing and the scoped UDP sender
//! - [`frame`] — Message framing (2-byte total length, 1-byte payload length, UTF-8 payload)
//!
//! The whole operation is one encode followed by one fire-and-forget send:
//!
//! ```no_run
//! use lpmsg::transport::Destination;
//!
//! let sent = lpmsg::send_message(&Destination::new("localhost", 12000), "Hello World")?;
//! assert_eq!(sent, 14);
//! # Ok::<(), lpmsg::frame::FrameError>(())
//! ```

use bytes::Bytes;
use tracing::debug;

/// Re-export transport types.
pub mod transport {
    pub use lpmsg_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use lpmsg_frame::*;
}

use lpmsg_frame::{FrameConfig, FrameError, Message, MessageWriter, Result};
use lpmsg_transport::{Destination, UdpConfig, UdpSender};

/// Encode `payload` and send it once to `destination`.
///
/// Returns the number of bytes handed to the local network stack. An
/// oversized payload fails before any socket is opened; no response is read
/// and nothing is retried.
pub fn send_message(destination: &Destination, payload: &str) -> Result<usize> {
    send_message_with_config(
        destination,
        payload,
        &FrameConfig::default(),
        &UdpConfig::default(),
    )
}

/// Same as [`send_message`] with explicit frame and socket configuration.
pub fn send_message_with_config(
    destination: &Destination,
    payload: &str,
    frame_config: &FrameConfig,
    udp_config: &UdpConfig,
) -> Result<usize> {
    let message = Message::from(payload.to_string());
    send_frame(destination, &message, frame_config, udp_config).map(|frame| frame.len())
}

/// Send `message` once and return the exact datagram handed to the network.
pub fn send_frame(
    destination: &Destination,
    message: &Message,
    frame_config: &FrameConfig,
    udp_config: &UdpConfig,
) -> Result<Bytes> {
    let max = frame_config.effective_max_payload();
    if message.payload_len() > max {
        return Err(FrameError::PayloadTooLarge {
            size: message.payload_len(),
            max,
        });
    }

    let sender = UdpSender::open_with_config(destination, udp_config)?;
    debug!(%destination, target = %sender.target(), "sending message");

    let mut writer = MessageWriter::with_config(sender, frame_config.clone());
    writer.write_message(message)?;
    Ok(Bytes::copy_from_slice(writer.last_frame()))
}
