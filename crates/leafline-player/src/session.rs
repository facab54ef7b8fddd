//! The session aggregate assembled during field entry.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Inventory, Monsterbook, Questlog, Skillbook, Telerock};

/// A character's id as the server assigns it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CharacterId(pub i32);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C-{}", self.0)
    }
}

/// Where a character appears: a map and a portal inside it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub map_id: i32,
    pub portal_id: u8,
}

impl SpawnPoint {
    pub fn new(map_id: i32, portal_id: u8) -> Self {
        Self { map_id, portal_id }
    }
}

impl fmt::Display for SpawnPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "map {} portal {}", self.map_id, self.portal_id)
    }
}

/// Everything the full bootstrap decodes, handed to the game-state owner
/// in one move.
///
/// The stat block is not here: it is decoded and kept by the stat
/// collaborator. `spawn` is the map and portal it reports once derived
/// stats are recalculated. Cooldowns are applied as they are read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub channel: u8,
    pub character_id: CharacterId,
    /// Current map and portal.
    pub spawn: SpawnPoint,
    pub buddy_capacity: u8,
    /// Name of a linked character, when the server sends one.
    pub linked_name: Option<String>,
    pub inventory: Inventory,
    pub skillbook: Skillbook,
    pub questlog: Questlog,
    pub telerock: Telerock,
    pub monsterbook: Monsterbook,
}
