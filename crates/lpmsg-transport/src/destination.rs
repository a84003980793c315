use std::fmt;
use std::net::{SocketAddr, ToSocketAddrs};
use std::str::FromStr;

use tracing::debug;

use crate::error::{Result, TransportError};

/// Host used when none is configured.
pub const DEFAULT_HOST: &str = "localhost";

/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 12000;

/// Where datagrams are sent: a host name or IP literal plus a UDP port.
///
/// Resolution is deferred until [`Destination::resolve`] so a destination can
/// be built from configuration before the network is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub host: String,
    pub port: u16,
}

impl Destination {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Resolve to the first socket address the system reports for this host.
    pub fn resolve(&self) -> Result<SocketAddr> {
        let target = self.to_string();
        let addr = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|source| TransportError::Resolve {
                target: target.clone(),
                source,
            })?
            .next()
            .ok_or(TransportError::NoAddress { target })?;
        debug!(destination = %self, %addr, "resolved destination");
        Ok(addr)
    }
}

impl Default for Destination {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl From<SocketAddr> for Destination {
    fn from(addr: SocketAddr) -> Self {
        Self::new(addr.ip().to_string(), addr.port())
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// A `host:port` string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DestinationParseError {
    #[error("missing port in {0:?} (expected host:port)")]
    MissingPort(String),

    #[error("empty host in {0:?}")]
    EmptyHost(String),

    #[error("invalid port in {0:?}")]
    InvalidPort(String),

    #[error("IPv6 host must be bracketed in {0:?} (expected [addr]:port)")]
    UnbracketedIpv6(String),
}

impl FromStr for Destination {
    type Err = DestinationParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| DestinationParseError::MissingPort(s.to_string()))?;

        let host = match host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
            Some(inner) => inner,
            None if host.contains(':') => {
                return Err(DestinationParseError::UnbracketedIpv6(s.to_string()))
            }
            None => host,
        };
        if host.is_empty() {
            return Err(DestinationParseError::EmptyHost(s.to_string()));
        }

        let port: u16 = port
            .parse()
            .map_err(|_| DestinationParseError::InvalidPort(s.to_string()))?;

        Ok(Self::new(host, port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_localhost_12000() {
        let dest = Destination::default();
        assert_eq!(dest.host, "localhost");
        assert_eq!(dest.port, 12000);
        assert_eq!(dest.to_string(), "localhost:12000");
    }

    #[test]
    fn parses_host_and_port() {
        let dest: Destination = "example.org:9".parse().unwrap();
        assert_eq!(dest, Destination::new("example.org", 9));
    }

    #[test]
    fn parses_bracketed_ipv6() {
        let dest: Destination = "[::1]:12000".parse().unwrap();
        assert_eq!(dest.host, "::1");
        assert_eq!(dest.to_string(), "[::1]:12000");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            "localhost".parse::<Destination>(),
            Err(DestinationParseError::MissingPort(_))
        ));
        assert!(matches!(
            ":80".parse::<Destination>(),
            Err(DestinationParseError::EmptyHost(_))
        ));
        assert!(matches!(
            "localhost:99999".parse::<Destination>(),
            Err(DestinationParseError::InvalidPort(_))
        ));
        assert!(matches!(
            "::1:80".parse::<Destination>(),
            Err(DestinationParseError::UnbracketedIpv6(_))
        ));
    }

    #[test]
    fn resolves_ip_literal_without_dns() {
        let addr = Destination::new("127.0.0.1", 4242).resolve().unwrap();
        assert_eq!(addr, "127.0.0.1:4242".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn from_socket_addr_round_trips_display() {
        let addr: SocketAddr = "[::1]:7".parse().unwrap();
        assert_eq!(Destination::from(addr).to_string(), "[::1]:7");
    }
}
