//! Blocks the client reads but does not use.
//!
//! Minigame records, the three ring lists, new-year cards, and area info
//! all have a known shape but no consumer yet. They still have to be read
//! field by field so the cursor lands on the block after them.
//!
//! Each block is an `i16` count followed by that many entries of a fixed
//! [`Field`] layout.

use leafline_wire::{InPacket, WireError};

/// Capacity of the character-name fields in ring records.
const NAME_CAPACITY: usize = 13;

/// One primitive in a reserved entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Short,
    Int,
    /// `u16`-prefixed string.
    Str,
    /// Fixed-width NUL-padded string of the given capacity.
    Padded(usize),
}

impl Field {
    fn consume(self, packet: &mut InPacket<'_>) -> Result<(), WireError> {
        match self {
            Field::Short => packet.skip(2),
            Field::Int => packet.skip(4),
            Field::Str => packet.read_string().map(drop),
            Field::Padded(capacity) => packet.read_padded_string(capacity).map(drop),
        }
    }
}

/// A counted block whose entries are read and thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedBlock {
    /// Entries carry no fields.
    Minigame,
    /// `ring id, partner name, 4 × i32`.
    CoupleRing,
    /// `ring id, partner name, 5 × i32`.
    FriendshipRing,
    /// `3 × i32, i16, 2 × i32, two names`.
    MarriageRing,
    /// Entries carry no fields.
    NewYearCards,
    /// `i16 area id, string info`.
    AreaInfo,
}

impl ReservedBlock {
    /// The field sequence of a single entry.
    pub fn layout(self) -> &'static [Field] {
        use Field::*;
        match self {
            ReservedBlock::Minigame | ReservedBlock::NewYearCards => &[],
            ReservedBlock::CoupleRing => &[Int, Padded(NAME_CAPACITY), Int, Int, Int, Int],
            ReservedBlock::FriendshipRing => {
                &[Int, Padded(NAME_CAPACITY), Int, Int, Int, Int, Int]
            }
            ReservedBlock::MarriageRing => &[
                Int,
                Int,
                Int,
                Short,
                Int,
                Int,
                Padded(NAME_CAPACITY),
                Padded(NAME_CAPACITY),
            ],
            ReservedBlock::AreaInfo => &[Short, Str],
        }
    }

    /// Reads the count and every entry, returning how many were discarded.
    pub fn discard(self, packet: &mut InPacket<'_>) -> Result<usize, WireError> {
        let count = packet.read_i16()?;
        let layout = self.layout();
        let mut discarded = 0;
        for _ in 0..count {
            for field in layout {
                field.consume(packet)?;
            }
            discarded += 1;
        }
        if discarded > 0 {
            tracing::trace!(block = ?self, discarded, "skipped reserved entries");
        }
        Ok(discarded)
    }
}
