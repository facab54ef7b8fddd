//! Numeric message tags.
//!
//! The server speaks far more opcodes than the client models. Only the ones
//! the client handles or sends get a name here; everything else stays a raw
//! `u16` and is dropped by the dispatcher.

use std::fmt;

/// Server-to-client opcodes with a handler in this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum RecvOpcode {
    /// Field entry: either a map change or the full character bootstrap.
    SetField = 0x7D,
}

impl RecvOpcode {
    /// The raw value as it appears on the wire.
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Maps a raw value back to a known opcode.
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0x7D => Some(Self::SetField),
            _ => None,
        }
    }
}

impl fmt::Display for RecvOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}(0x{:02X})", self, self.code())
    }
}

/// Client-to-server opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum SendOpcode {
    TalkToNpc = 0x3A,
    NpcTalkMore = 0x3C,
    NpcShopAction = 0x3D,
    /// Zero-payload "my state changed, re-broadcast me".
    PlayerUpdate = 0xC0,
}

impl SendOpcode {
    pub const fn code(self) -> u16 {
        self as u16
    }
}

impl fmt::Display for SendOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}(0x{:02X})", self, self.code())
    }
}
