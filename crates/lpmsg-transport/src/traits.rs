use crate::error::Result;

/// Something that accepts whole datagrams.
///
/// Each call is one independent transmission. Implementations return the
/// number of bytes the underlying stack accepted; callers decide whether a
/// short count is an error.
pub trait DatagramSink {
    /// Hand one datagram to the sink (blocking).
    fn send_datagram(&mut self, buf: &[u8]) -> Result<usize>;
}

impl<S: DatagramSink + ?Sized> DatagramSink for &mut S {
    fn send_datagram(&mut self, buf: &[u8]) -> Result<usize> {
        (**self).send_datagram(buf)
    }
}

/// Collects datagrams in memory, one entry per send.
impl DatagramSink for Vec<Vec<u8>> {
    fn send_datagram(&mut self, buf: &[u8]) -> Result<usize> {
        self.push(buf.to_vec());
        Ok(buf.len())
    }
}
