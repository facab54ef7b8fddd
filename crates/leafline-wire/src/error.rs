//! Error types for the wire layer.
//!
//! Reading past the end of a packet is the only way decoding can fail.
//! Corrupt or mismatched packets surface as an [`WireError::Overrun`]
//! somewhere down the line, because every field has a fixed width and a
//! single miscounted byte shifts everything that follows.

/// Errors raised while reading or writing packet bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// A read needed more bytes than the packet had left.
    ///
    /// Fatal for the message being decoded. The connection owner decides
    /// whether to drop the connection.
    #[error(
        "read of {wanted} bytes at offset {position} overruns packet ({remaining} left)"
    )]
    Overrun {
        /// Bytes the read needed.
        wanted: usize,
        /// Bytes that were still unread.
        remaining: usize,
        /// Cursor position when the read was attempted.
        position: usize,
    },

    /// A string is longer than its length prefix or fixed field allows.
    #[error("string of {len} bytes exceeds capacity {capacity}")]
    StringTooLong { len: usize, capacity: usize },

    /// A character has no single-byte encoding.
    #[error("character {0:?} cannot be encoded as a single byte")]
    Unencodable(char),
}
