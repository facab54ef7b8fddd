//! The inbound packet cursor.
//!
//! [`InPacket`] wraps a borrowed byte slice and walks it front to back.
//! `&[u8]` already implements [`bytes::Buf`], so the typed getters come
//! from there; this type adds the bounds check in front of every read so a
//! short packet becomes a [`WireError::Overrun`] instead of a panic.

use bytes::Buf;

use crate::WireError;

/// A forward-only reader over a single framed message.
///
/// The cursor never rewinds. Every `read_*` call either consumes exactly
/// the bytes it decodes or fails without moving.
#[derive(Debug, Clone)]
pub struct InPacket<'a> {
    /// The unread tail of the message.
    data: &'a [u8],
    /// Total message length, used to report the cursor position.
    len: usize,
}

impl<'a> InPacket<'a> {
    /// Creates a reader positioned at the first byte of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            len: data.len(),
        }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.len - self.data.len()
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.remaining()
    }

    /// Returns `true` once every byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        !self.data.has_remaining()
    }

    fn ensure(&self, wanted: usize) -> Result<(), WireError> {
        if self.data.remaining() < wanted {
            return Err(WireError::Overrun {
                wanted,
                remaining: self.data.remaining(),
                position: self.position(),
            });
        }
        Ok(())
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        self.ensure(n)?;
        let (head, tail) = self.data.split_at(n);
        self.data = tail;
        Ok(head)
    }

    // -----------------------------------------------------------------------
    // Primitives
    // -----------------------------------------------------------------------

    pub fn read_i8(&mut self) -> Result<i8, WireError> {
        self.ensure(1)?;
        Ok(self.data.get_i8())
    }

    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        self.ensure(1)?;
        Ok(self.data.get_u8())
    }

    pub fn read_i16(&mut self) -> Result<i16, WireError> {
        self.ensure(2)?;
        Ok(self.data.get_i16_le())
    }

    pub fn read_u16(&mut self) -> Result<u16, WireError> {
        self.ensure(2)?;
        Ok(self.data.get_u16_le())
    }

    pub fn read_i32(&mut self) -> Result<i32, WireError> {
        self.ensure(4)?;
        Ok(self.data.get_i32_le())
    }

    pub fn read_u32(&mut self) -> Result<u32, WireError> {
        self.ensure(4)?;
        Ok(self.data.get_u32_le())
    }

    pub fn read_i64(&mut self) -> Result<i64, WireError> {
        self.ensure(8)?;
        Ok(self.data.get_i64_le())
    }

    pub fn read_u64(&mut self) -> Result<u64, WireError> {
        self.ensure(8)?;
        Ok(self.data.get_u64_le())
    }

    /// Reads one byte; any non-zero value is `true`.
    pub fn read_bool(&mut self) -> Result<bool, WireError> {
        Ok(self.read_u8()? != 0)
    }

    // -----------------------------------------------------------------------
    // Composites
    // -----------------------------------------------------------------------

    /// Reads a `u16` length followed by that many Latin-1 bytes.
    ///
    /// The prefix is peeked first, so a body that overruns leaves the
    /// cursor on the prefix.
    pub fn read_string(&mut self) -> Result<String, WireError> {
        self.ensure(2)?;
        let mut prefix = &self.data[..2];
        let len = usize::from(prefix.get_u16_le());
        self.ensure(2 + len)?;
        self.data.advance(2);
        let raw = self.take(len)?;
        Ok(latin1(raw))
    }

    /// Reads exactly `capacity` bytes of NUL-padded Latin-1 text.
    ///
    /// Everything from the first NUL onwards is filler and is dropped.
    pub fn read_padded_string(
        &mut self,
        capacity: usize,
    ) -> Result<String, WireError> {
        let raw = self.take(capacity)?;
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        Ok(latin1(&raw[..end]))
    }

    /// Advances past `n` bytes the client does not model yet.
    pub fn skip(&mut self, n: usize) -> Result<(), WireError> {
        self.ensure(n)?;
        self.data.advance(n);
        Ok(())
    }
}

fn latin1(raw: &[u8]) -> String {
    raw.iter().copied().map(char::from).collect()
}
