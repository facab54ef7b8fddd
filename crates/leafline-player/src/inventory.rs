//! Inventory snapshot and its decoder.
//!
//! The item block is the largest part of the field-entry message. Its layout:
//!
//! ```text
//! i32 meso
//! u8 × 5        slot limits: equip, use, setup, etc, cash
//! 8 bytes       reserved
//! i16-slot list equipped items         ─┐
//! i16-slot list cash-equipped items     │ each list ends at slot 0
//! i16-slot list stored equipment       ─┘
//! 2 bytes       reserved
//! i8-slot list  × 4: use, setup, etc, cash
//! ```
//!
//! Every non-zero slot is followed by one item record. The record layout
//! belongs to the [`ItemCodec`] collaborator; this module only walks the
//! slot lists around it.

use std::collections::BTreeMap;

use leafline_wire::{InPacket, WireError};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// InventoryType
// ---------------------------------------------------------------------------

/// An item category.
///
/// `Equipped` holds what the character is wearing. The other five are the
/// tabs of the item window, each with its own slot limit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum InventoryType {
    Equipped,
    Equip,
    Use,
    Setup,
    Etc,
    Cash,
}

impl InventoryType {
    /// The five tabs, in the order their slot limits appear on the wire.
    pub const TABS: [InventoryType; 5] = [
        InventoryType::Equip,
        InventoryType::Use,
        InventoryType::Setup,
        InventoryType::Etc,
        InventoryType::Cash,
    ];

    /// The tabs whose slot lists use `i8` slot numbers.
    const BYTE_SLOTTED: [InventoryType; 4] = [
        InventoryType::Use,
        InventoryType::Setup,
        InventoryType::Etc,
        InventoryType::Cash,
    ];
}

/// The three `i16`-slot lists, in wire order.
#[derive(Debug, Clone, Copy)]
enum EquipList {
    Worn,
    CashWorn,
    Stored,
}

impl EquipList {
    const WIRE_ORDER: [EquipList; 3] =
        [EquipList::Worn, EquipList::CashWorn, EquipList::Stored];

    /// Where an item read from this list is filed.
    ///
    /// Cash-equipped items go into the equip tab under the negated slot, so
    /// a negative equip slot always means "worn".
    fn place(self, pos: i16) -> (InventoryType, i16) {
        match self {
            EquipList::Worn => (InventoryType::Equipped, pos),
            EquipList::CashWorn => (InventoryType::Equip, pos.wrapping_neg()),
            EquipList::Stored => (InventoryType::Equip, pos),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One item as handed back by the [`ItemCodec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub item_id: i32,
    pub quantity: i16,
}

/// The character's items, currency, and tab sizes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    meso: i32,
    slot_max: BTreeMap<InventoryType, u8>,
    items: BTreeMap<InventoryType, BTreeMap<i16, Item>>,
}

impl Inventory {
    pub fn meso(&self) -> i32 {
        self.meso
    }

    pub fn set_meso(&mut self, meso: i32) {
        self.meso = meso;
    }

    /// Slot limit of a tab. `Equipped` and unset tabs report 0.
    pub fn slot_max(&self, tab: InventoryType) -> u8 {
        self.slot_max.get(&tab).copied().unwrap_or(0)
    }

    pub fn set_slot_max(&mut self, tab: InventoryType, max: u8) {
        self.slot_max.insert(tab, max);
    }

    /// Files `item` under `(category, slot)`, replacing whatever was there.
    pub fn add_item(&mut self, category: InventoryType, slot: i16, item: Item) {
        let previous = self.items.entry(category).or_default().insert(slot, item);
        if previous.is_some() {
            tracing::debug!(?category, slot, "item slot decoded twice, keeping last");
        }
    }

    pub fn item(&self, category: InventoryType, slot: i16) -> Option<&Item> {
        self.items.get(&category)?.get(&slot)
    }

    /// Items of one category in ascending slot order.
    pub fn items(&self, category: InventoryType) -> impl Iterator<Item = (i16, &Item)> {
        self.items
            .get(&category)
            .into_iter()
            .flat_map(|slots| slots.iter().map(|(slot, item)| (*slot, item)))
    }

    /// Total number of items across all categories.
    pub fn len(&self) -> usize {
        self.items.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decodes a single item record and files it into the inventory.
///
/// Implemented by the game-state owner, which knows the item record layout
/// (equipment stats, pets, cash serials). The implementation must consume
/// exactly one record.
pub trait ItemCodec {
    fn parse_item(
        &mut self,
        packet: &mut InPacket<'_>,
        category: InventoryType,
        slot: i16,
        inventory: &mut Inventory,
    ) -> Result<(), WireError>;
}

/// Decodes the item block.
///
/// # Errors
/// Any [`WireError`] from the slot lists or from `codec`.
pub fn parse_inventory(
    packet: &mut InPacket<'_>,
    codec: &mut impl ItemCodec,
) -> Result<Inventory, WireError> {
    let mut inventory = Inventory::default();

    inventory.set_meso(packet.read_i32()?);
    for tab in InventoryType::TABS {
        inventory.set_slot_max(tab, packet.read_u8()?);
    }

    packet.skip(8)?;

    for list in EquipList::WIRE_ORDER {
        loop {
            let pos = packet.read_i16()?;
            if pos == 0 {
                break;
            }
            let (category, slot) = list.place(pos);
            codec.parse_item(packet, category, slot, &mut inventory)?;
        }
    }

    packet.skip(2)?;

    for tab in InventoryType::BYTE_SLOTTED {
        loop {
            let pos = packet.read_i8()?;
            if pos == 0 {
                break;
            }
            codec.parse_item(packet, tab, i16::from(pos), &mut inventory)?;
        }
    }

    Ok(inventory)
}
