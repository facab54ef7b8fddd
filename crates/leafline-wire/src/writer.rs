//! Outbound packet construction.
//!
//! [`PacketWriter`] is the mirror image of [`InPacket`](crate::InPacket):
//! each `write_*` appends exactly the bytes the matching `read_*` consumes.
//! [`OutPacket`] pairs a writer with the [`SendOpcode`] that heads it on
//! the wire.

use bytes::{BufMut, Bytes, BytesMut};

use crate::{SendOpcode, WireError};

/// Appends little-endian primitives to a growable buffer.
#[derive(Debug, Clone, Default)]
pub struct PacketWriter {
    buf: BytesMut,
}

impl PacketWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_i8(&mut self, value: i8) -> &mut Self {
        self.buf.put_i8(value);
        self
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.buf.put_u8(value);
        self
    }

    pub fn write_i16(&mut self, value: i16) -> &mut Self {
        self.buf.put_i16_le(value);
        self
    }

    pub fn write_u16(&mut self, value: u16) -> &mut Self {
        self.buf.put_u16_le(value);
        self
    }

    pub fn write_i32(&mut self, value: i32) -> &mut Self {
        self.buf.put_i32_le(value);
        self
    }

    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        self.buf.put_u32_le(value);
        self
    }

    pub fn write_i64(&mut self, value: i64) -> &mut Self {
        self.buf.put_i64_le(value);
        self
    }

    pub fn write_u64(&mut self, value: u64) -> &mut Self {
        self.buf.put_u64_le(value);
        self
    }

    pub fn write_bool(&mut self, value: bool) -> &mut Self {
        self.buf.put_u8(u8::from(value));
        self
    }

    /// Appends `n` zero bytes. The inverse of [`InPacket::skip`](crate::InPacket::skip).
    pub fn write_zeros(&mut self, n: usize) -> &mut Self {
        self.buf.put_bytes(0, n);
        self
    }

    /// Appends a `u16` length prefix followed by the Latin-1 bytes of `text`.
    ///
    /// # Errors
    /// [`WireError::Unencodable`] for characters above U+00FF and
    /// [`WireError::StringTooLong`] past `u16::MAX` bytes. Nothing is
    /// written on error.
    pub fn write_string(&mut self, text: &str) -> Result<&mut Self, WireError> {
        let raw = encode_latin1(text)?;
        let len = u16::try_from(raw.len()).map_err(|_| WireError::StringTooLong {
            len: raw.len(),
            capacity: usize::from(u16::MAX),
        })?;
        self.buf.put_u16_le(len);
        self.buf.put_slice(&raw);
        Ok(self)
    }

    /// Writes `text` into a fixed field of `capacity` bytes, NUL-padded.
    ///
    /// # Errors
    /// [`WireError::StringTooLong`] if `text` does not fit, and
    /// [`WireError::Unencodable`] as for [`write_string`](Self::write_string).
    pub fn write_padded_string(
        &mut self,
        text: &str,
        capacity: usize,
    ) -> Result<&mut Self, WireError> {
        let raw = encode_latin1(text)?;
        if raw.len() > capacity {
            return Err(WireError::StringTooLong {
                len: raw.len(),
                capacity,
            });
        }
        self.buf.put_slice(&raw);
        self.buf.put_bytes(0, capacity - raw.len());
        Ok(self)
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the writer and returns its contents.
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }
}

fn encode_latin1(text: &str) -> Result<Vec<u8>, WireError> {
    text.chars()
        .map(|c| u8::try_from(c).map_err(|_| WireError::Unencodable(c)))
        .collect()
}

// ---------------------------------------------------------------------------
// OutPacket
// ---------------------------------------------------------------------------

/// A client-to-server request: a send opcode plus its payload.
#[derive(Debug, Clone)]
pub struct OutPacket {
    opcode: SendOpcode,
    body: PacketWriter,
}

impl OutPacket {
    /// Starts a request with an empty payload.
    pub fn new(opcode: SendOpcode) -> Self {
        Self {
            opcode,
            body: PacketWriter::new(),
        }
    }

    pub fn opcode(&self) -> SendOpcode {
        self.opcode
    }

    /// The payload, without the opcode header.
    pub fn body(&self) -> &[u8] {
        self.body.as_bytes()
    }

    /// Mutable access to the payload writer.
    pub fn writer(&mut self) -> &mut PacketWriter {
        &mut self.body
    }

    /// The full frame: `u16` opcode followed by the payload.
    pub fn to_bytes(&self) -> Bytes {
        let mut frame = BytesMut::with_capacity(2 + self.body.len());
        frame.put_u16_le(self.opcode.code());
        frame.put_slice(self.body.as_bytes());
        frame.freeze()
    }
}
