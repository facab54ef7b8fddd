//! Monster book: collected monster cards.

use std::collections::BTreeMap;

use leafline_wire::{InPacket, WireError};
use serde::{Deserialize, Serialize};

/// The chosen cover and the level of each collected card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monsterbook {
    cover: i32,
    cards: BTreeMap<i16, i8>,
}

impl Monsterbook {
    pub fn cover(&self) -> i32 {
        self.cover
    }

    pub fn set_cover(&mut self, cover: i32) {
        self.cover = cover;
    }

    pub fn add_card(&mut self, card: i16, level: i8) {
        self.cards.insert(card, level);
    }

    pub fn card_level(&self, card: i16) -> Option<i8> {
        self.cards.get(&card).copied()
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }
}

/// Decodes `i32 cover, 1 reserved byte, i16 count, (i16 card, i8 level)*`.
pub fn parse_monsterbook(packet: &mut InPacket<'_>) -> Result<Monsterbook, WireError> {
    let mut book = Monsterbook::default();
    book.set_cover(packet.read_i32()?);

    packet.skip(1)?;

    let count = packet.read_i16()?;
    for _ in 0..count {
        let card = packet.read_i16()?;
        let level = packet.read_i8()?;
        book.add_card(card, level);
    }
    Ok(book)
}
