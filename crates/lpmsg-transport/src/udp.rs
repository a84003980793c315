use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use std::time::Duration;

use tracing::debug;

use crate::destination::Destination;
use crate::error::{Result, TransportError};
use crate::traits::DatagramSink;

/// Configuration for the UDP sender.
#[derive(Debug, Clone, Default)]
pub struct UdpConfig {
    /// Write timeout for the blocking send. Default: none.
    pub write_timeout: Option<Duration>,
}

/// UDP datagram sender bound to one destination.
///
/// Owns an ephemeral local socket of the same address family as the
/// destination. The socket is closed when the sender is dropped, including
/// on early returns through `?`.
pub struct UdpSender {
    socket: UdpSocket,
    target: SocketAddr,
}

impl UdpSender {
    /// Resolve `destination` and bind a local socket for sending to it.
    pub fn open(destination: &Destination) -> Result<Self> {
        Self::open_with_config(destination, &UdpConfig::default())
    }

    /// Resolve `destination` and bind a local socket with explicit configuration.
    pub fn open_with_config(destination: &Destination, config: &UdpConfig) -> Result<Self> {
        let target = destination.resolve()?;
        Self::bind_for(target, config)
    }

    /// Bind a local socket for sending to an already-resolved address.
    pub fn bind_for(target: SocketAddr, config: &UdpConfig) -> Result<Self> {
        let local = unspecified_for(&target);
        let socket =
            UdpSocket::bind(local).map_err(|source| TransportError::Bind { addr: local, source })?;
        socket.set_write_timeout(config.write_timeout)?;

        debug!(
            local = ?socket.local_addr().ok(),
            %target,
            "opened udp socket"
        );

        Ok(Self { socket, target })
    }

    /// The resolved address datagrams are sent to.
    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// The ephemeral local address the socket is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.socket.local_addr().map_err(Into::into)
    }
}

impl DatagramSink for UdpSender {
    fn send_datagram(&mut self, buf: &[u8]) -> Result<usize> {
        let sent = self
            .socket
            .send_to(buf, self.target)
            .map_err(|source| TransportError::Send {
                target: self.target,
                source,
            })?;
        debug!(target = %self.target, bytes = sent, "sent datagram");
        Ok(sent)
    }
}

impl Drop for UdpSender {
    fn drop(&mut self) {
        debug!(target = %self.target, "closing udp socket");
    }
}

impl std::fmt::Debug for UdpSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UdpSender")
            .field("target", &self.target)
            .finish()
    }
}

fn unspecified_for(target: &SocketAddr) -> SocketAddr {
    match target {
        SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
        SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_receiver() -> UdpSocket {
        let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
        socket
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        socket
    }

    #[test]
    fn test_send_reaches_receiver() {
        let receiver = local_receiver();
        let dest = Destination::from(receiver.local_addr().unwrap());

        let mut sender = UdpSender::open(&dest).unwrap();
        assert_eq!(sender.target(), receiver.local_addr().unwrap());

        let sent = sender.send_datagram(b"hello").unwrap();
        assert_eq!(sent, 5);

        let mut buf = [0u8; 64];
        let (n, from) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"hello");
        assert_eq!(from.port(), sender.local_addr().unwrap().port());
    }

    #[test]
    fn test_empty_datagram_is_delivered() {
        let receiver = local_receiver();
        let mut sender = UdpSender::bind_for(receiver.local_addr().unwrap(), &UdpConfig::default())
            .unwrap();

        assert_eq!(sender.send_datagram(&[]).unwrap(), 0);

        let mut buf = [0u8; 8];
        let (n, _) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(n, 0);
    }

    #[test]
    fn test_binds_matching_family() {
        let v4: SocketAddr = "127.0.0.1:9".parse().unwrap();
        let v6: SocketAddr = "[::1]:9".parse().unwrap();
        assert!(unspecified_for(&v4).is_ipv4());
        assert!(unspecified_for(&v6).is_ipv6());
        assert_eq!(unspecified_for(&v4).port(), 0);
    }

    #[test]
    fn test_write_timeout_applied() {
        let config = UdpConfig {
            write_timeout: Some(Duration::from_millis(250)),
        };
        let sender = UdpSender::bind_for("127.0.0.1:9".parse().unwrap(), &config).unwrap();

        // The kernel rounds SO_SNDTIMEO up to its timer tick.
        let applied = sender
            .socket
            .write_timeout()
            .unwrap()
            .expect("write timeout should be set");
        assert!(applied >= Duration::from_millis(250), "got {applied:?}");
        assert!(applied < Duration::from_secs(1), "got {applied:?}");
    }

    #[test]
    fn test_no_write_timeout_by_default() {
        let sender =
            UdpSender::bind_for("127.0.0.1:9".parse().unwrap(), &UdpConfig::default()).unwrap();
        assert_eq!(sender.socket.write_timeout().unwrap(), None);
    }

    #[test]
    fn test_unresolvable_host_fails_before_bind() {
        let dest = Destination::new("host.invalid", 9);
        let result = UdpSender::open(&dest);
        assert!(matches!(
            result,
            Err(TransportError::Resolve { .. }) | Err(TransportError::NoAddress { .. })
        ));
    }
}
