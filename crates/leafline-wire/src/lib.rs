//! Wire layer for Leafline.
//!
//! This crate knows how bytes are laid out and nothing about what they
//! mean:
//!
//! - **Reading** ([`InPacket`]): a forward-only cursor over one framed,
//!   already-decrypted message.
//! - **Writing** ([`PacketWriter`], [`OutPacket`]): the inverse primitives,
//!   used to build client-to-server requests.
//! - **Opcodes** ([`RecvOpcode`], [`SendOpcode`]): the numeric message tags.
//! - **Requests** ([`packets`]): builders for the outbound messages the
//!   client sends.
//!
//! All integers are little-endian. Strings are Latin-1: one byte per
//! character, prefixed by a `u16` length unless they live in a fixed-width
//! field.
//!
//! ```text
//! Transport (framed bytes) → Wire (InPacket) → Handlers (records)
//! ```

mod error;
mod opcode;
mod reader;
mod writer;

pub mod packets;

pub use error::WireError;
pub use opcode::{RecvOpcode, SendOpcode};
pub use reader::InPacket;
pub use writer::{OutPacket, PacketWriter};
