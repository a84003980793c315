use bytes::BytesMut;
use lpmsg_transport::{DatagramSink, TransportError};
use tracing::debug;

use crate::codec::{encode_message, FrameConfig, Message, HEADER_SIZE, MAX_PAYLOAD};
use crate::error::{FrameError, Result};

/// Encodes messages and hands each one to a [`DatagramSink`] as a single datagram.
pub struct MessageWriter<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
}

impl<T: DatagramSink> MessageWriter<T> {
    /// Create a new message writer with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new message writer with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(HEADER_SIZE + MAX_PAYLOAD),
            config,
        }
    }

    /// Write a complete message (blocking).
    pub fn write_message(&mut self, message: &Message) -> Result<usize> {
        self.send(message.text())
    }

    /// Encode `text` and send it as one datagram.
    ///
    /// Encoding failures are returned before the sink is touched. Returns the
    /// number of bytes accepted by the sink, which is always the full frame.
    pub fn send(&mut self, text: &str) -> Result<usize> {
        let max = self.config.effective_max_payload();
        self.buf.clear();
        if text.len() > max {
            return Err(FrameError::PayloadTooLarge {
                size: text.len(),
                max,
            });
        }

        encode_message(text, &mut self.buf)?;

        let expected = self.buf.len();
        let sent = self.inner.send_datagram(&self.buf)?;
        if sent != expected {
            return Err(TransportError::ShortSend { sent, expected }.into());
        }

        debug!(payload_len = text.len(), bytes = sent, "message sent");
        Ok(sent)
    }

    /// The frame encoded by the most recent `send`, exactly as handed to the sink.
    ///
    /// Empty before the first send and after an encoding failure.
    pub fn last_frame(&self) -> &[u8] {
        &self.buf
    }

    /// Borrow the underlying sink.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying sink.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner sink.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Update maximum payload size for subsequent sends.
    pub fn set_max_payload_size(&mut self, max_payload_size: usize) {
        self.config.max_payload_size = max_payload_size;
    }

    /// Current writer configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}
