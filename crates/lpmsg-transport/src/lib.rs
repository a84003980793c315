//! Fire-and-forget datagram transport.
//!
//! Resolves a `host:port` destination and hands complete datagrams to the
//! local network stack over UDP. Nothing is ever read back: there is no
//! connection, acknowledgment, or retransmission at this layer.
//!
//! This is the lowest layer of lpmsg. The framing crate writes through the
//! [`DatagramSink`] trait defined here.

pub mod destination;
pub mod error;
pub mod traits;
pub mod udp;

pub use destination::{Destination, DestinationParseError, DEFAULT_HOST, DEFAULT_PORT};
pub use error::{Result, TransportError};
pub use traits::DatagramSink;
pub use udp::{UdpConfig, UdpSender};
