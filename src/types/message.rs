//! Big-endian message buffers for binary payloads.
//!
//! Mirrors the `pq_getmsgint` / `pq_sendint` helpers the server uses on the
//! other side of the connection. Every read is bounds checked and reports a
//! [`FormatError::Truncated`] instead of panicking.

use crate::error::FormatError;

/// Cursor over a received payload.
pub(crate) struct MessageReader<'a> {
    buf: &'a [u8],
    pos: usize,
    type_name: &'static str,
}

impl<'a> MessageReader<'a> {
    pub(crate) fn new(buf: &'a [u8], type_name: &'static str) -> Self {
        Self {
            buf,
            pos: 0,
            type_name,
        }
    }

    /// Fail early when fewer than `n` bytes remain, before anything is
    /// allocated for them.
    pub(crate) fn require(&self, n: usize) -> Result<(), FormatError> {
        let remaining = self.buf.len() - self.pos;
        if n > remaining {
            tracing::debug!(
                type_name = self.type_name,
                needed = n,
                remaining,
                "rejecting truncated payload"
            );
            return Err(FormatError::Truncated {
                type_name: self.type_name,
                expected: self.pos.saturating_add(n),
                actual: self.buf.len(),
            });
        }
        Ok(())
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        self.require(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }

    pub(crate) fn get_u16(&mut self) -> Result<u16, FormatError> {
        self.take::<2>().map(u16::from_be_bytes)
    }

    pub(crate) fn get_u32(&mut self) -> Result<u32, FormatError> {
        self.take::<4>().map(u32::from_be_bytes)
    }

    pub(crate) fn get_f32(&mut self) -> Result<f32, FormatError> {
        self.get_u32().map(f32::from_bits)
    }

    /// The payload must be fully consumed.
    pub(crate) fn finish(self) -> Result<(), FormatError> {
        let count = self.buf.len() - self.pos;
        if count != 0 {
            tracing::debug!(type_name = self.type_name, count, "rejecting trailing bytes");
            return Err(FormatError::TrailingBytes {
                type_name: self.type_name,
                count,
            });
        }
        Ok(())
    }
}

/// Reject a non-zero reserved header word.
pub(crate) fn check_unused(type_name: &'static str, unused: u32) -> Result<(), FormatError> {
    if unused != 0 {
        tracing::debug!(type_name, unused, "rejecting payload with reserved field set");
        return Err(FormatError::NonZeroReserved(unused));
    }
    Ok(())
}

#[inline]
pub(crate) fn send_u16(buf: &mut Vec<u8>, v: u16) {
    buf.extend_from_slice(&v.to_be_bytes());
}

#[inline]
pub(crate) fn send_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_be_bytes());
}

#[inline]
pub(crate) fn send_f32(buf: &mut Vec<u8>, v: f32) {
    send_u32(buf, v.to_bits());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_big_endian() {
        let bytes = [0x00, 0x03, 0x3f, 0x80, 0x00, 0x00];
        let mut msg = MessageReader::new(&bytes, "vector");
        assert_eq!(msg.get_u16(), Ok(3));
        assert_eq!(msg.get_f32(), Ok(1.0));
        assert_eq!(msg.finish(), Ok(()));
    }

    #[test]
    fn test_reader_truncated() {
        let bytes = [0x00, 0x03, 0x3f];
        let mut msg = MessageReader::new(&bytes, "vector");
        assert_eq!(msg.get_u16(), Ok(3));
        assert_eq!(
            msg.get_u32(),
            Err(FormatError::Truncated {
                type_name: "vector",
                expected: 6,
                actual: 3,
            })
        );
    }

    #[test]
    fn test_reader_trailing() {
        let bytes = [0x00, 0x01, 0xff];
        let mut msg = MessageReader::new(&bytes, "halfvec");
        assert_eq!(msg.get_u16(), Ok(1));
        assert!(matches!(
            msg.finish(),
            Err(FormatError::TrailingBytes { count: 1, .. })
        ));
    }

    #[test]
    fn test_writer() {
        let mut buf = Vec::new();
        send_u16(&mut buf, 2);
        send_u16(&mut buf, 0);
        send_f32(&mut buf, -2.0);
        assert_eq!(buf, [0x00, 0x02, 0x00, 0x00, 0xc0, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_check_unused() {
        assert_eq!(check_unused("vector", 0), Ok(()));
        assert_eq!(
            check_unused("vector", 1),
            Err(FormatError::NonZeroReserved(1))
        );
    }
}
