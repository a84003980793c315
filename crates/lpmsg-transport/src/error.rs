use std::net::SocketAddr;

/// Errors that can occur in datagram transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The destination host name could not be resolved.
    #[error("failed to resolve {target}: {source}")]
    Resolve {
        target: String,
        source: std::io::Error,
    },

    /// The destination resolved, but to no usable address.
    #[error("no address found for {target}")]
    NoAddress { target: String },

    /// Failed to bind the local sending socket.
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    /// The OS rejected the datagram.
    #[error("failed to send to {target}: {source}")]
    Send {
        target: SocketAddr,
        source: std::io::Error,
    },

    /// Only part of the datagram was accepted by the network stack.
    #[error("short datagram send ({sent} of {expected} bytes)")]
    ShortSend { sent: usize, expected: usize },

    /// An I/O error occurred on the socket.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransportError {
    /// The underlying I/O error, if this failure came from the OS.
    pub fn io_source(&self) -> Option<&std::io::Error> {
        match self {
            TransportError::Resolve { source, .. }
            | TransportError::Bind { source, .. }
            | TransportError::Send { source, .. }
            | TransportError::Io(source) => Some(source),
            TransportError::NoAddress { .. } | TransportError::ShortSend { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;
