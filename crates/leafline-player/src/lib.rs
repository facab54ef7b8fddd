//! Character state for Leafline.
//!
//! The field-entry message carries a player's whole starting state as one
//! long run of differently-encoded blocks. This crate holds a record type
//! and a decoder for each block:
//!
//! | Block | Record | Decoder |
//! |-------|--------|---------|
//! | items | [`Inventory`] | [`parse_inventory`] |
//! | skills | [`Skillbook`] | [`parse_skillbook`] |
//! | cooldowns | [`Cooldown`] | [`parse_cooldowns`] |
//! | quests | [`Questlog`] | [`parse_questlog`] |
//! | teleport rock | [`Telerock`] | [`parse_telerock`] |
//! | monster book | [`Monsterbook`] | [`parse_monsterbook`] |
//! | unused blocks | none | [`ReservedBlock::discard`] |
//!
//! The blocks have no framing between them. Each decoder consumes exactly
//! its own bytes and leaves the cursor on the first byte of the next block,
//! so they must be called in wire order. [`SessionState`] gathers the
//! results.
//!
//! Decoders never retry or recover: the first [`WireError`](leafline_wire::WireError)
//! aborts the whole message.

mod cooldown;
mod inventory;
mod monsterbook;
mod questlog;
mod reserved;
mod session;
mod skillbook;
mod telerock;

pub use cooldown::{Cooldown, parse_cooldowns};
pub use inventory::{Inventory, InventoryType, Item, ItemCodec, parse_inventory};
pub use monsterbook::{Monsterbook, parse_monsterbook};
pub use questlog::{QuestProgress, QuestRecord, Questlog, parse_questlog};
pub use reserved::{Field, ReservedBlock};
pub use session::{CharacterId, SessionState, SpawnPoint};
pub use skillbook::{SkillEntry, SkillKind, Skillbook, job_tier, parse_skillbook};
pub use telerock::{TELEROCK_SLOTS, TELEROCK_VIP_SLOTS, Telerock, parse_telerock};
