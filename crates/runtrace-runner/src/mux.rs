//! Multiplexed container stdio framing.
//!
//! A container's exec socket interleaves stdout and stderr on one byte
//! stream. Each frame starts with an 8-byte big-endian header word: the
//! top byte is the stream id, the low 56 bits the payload length.

use std::io::Read;

use crate::{Error, Result};

const LENGTH_MASK: u64 = 0x00ff_ffff_ffff_ffff;

/// Stream id carried in a frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
    /// Unknown id; callers discard the payload.
    Other(u8),
}

impl From<u8> for StreamKind {
    fn from(id: u8) -> Self {
        match id {
            1 => StreamKind::Stdout,
            2 => StreamKind::Stderr,
            other => StreamKind::Other(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub kind: StreamKind,
    pub data: Vec<u8>,
}

/// Reads frames off a container's multiplexed stdio socket.
pub struct FrameReader<R> {
    inner: R,
}

impl<R: Read> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Next frame, or `None` once the stream is closed.
    ///
    /// End of stream inside a header is a close (the peer hung up between
    /// frames); end of stream inside a payload is a protocol error.
    pub fn next_frame(&mut self) -> Result<Option<Frame>> {
        let mut header = [0u8; 8];
        if !self.fill(&mut header)? {
            return Ok(None);
        }

        let word = u64::from_be_bytes(header);
        let kind = StreamKind::from((word >> 56) as u8);
        let length = (word & LENGTH_MASK) as usize;
        log::debug!("container frame kind={:?} length={}", kind, length);

        let mut data = vec![0u8; length];
        if !self.fill(&mut data)? {
            return Err(Error::Protocol(format!(
                "stream closed inside a {}-byte payload",
                length
            )));
        }
        Ok(Some(Frame { kind, data }))
    }

    /// Read exactly `buf.len()` bytes; false when the stream ends first.
    fn fill(&mut self, buf: &mut [u8]) -> Result<bool> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.inner.read(&mut buf[filled..])?;
            if n == 0 {
                return Ok(false);
            }
            filled += n;
        }
        Ok(true)
    }
}
