//! The game-state owner, as seen from the decode handlers.

use leafline_player::{CharacterId, Cooldown, ItemCodec, SessionState, SpawnPoint};
use leafline_wire::{InPacket, OutPacket, WireError};
use serde::{Deserialize, Serialize};

/// A character listed on the character selection screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterEntry {
    pub id: CharacterId,
    pub name: String,
}

/// Everything the handlers need from the rest of the client: player state,
/// stats, character selection, and the outbound connection.
///
/// Handlers never own game state. They decode records and hand them over
/// through this trait, in the order the bytes arrive. Item records are
/// decoded through the [`ItemCodec`] supertrait.
pub trait GameWorld: ItemCodec {
    /// Record the channel the server placed the player on.
    fn set_channel(&mut self, channel: u8);

    /// Look up `id` on the character selection screen.
    ///
    /// `None` means no selection screen is active and there is nothing to
    /// compare against. An entry whose id differs from `id` marks the
    /// field-entry message as stale.
    fn character_entry(&self, id: CharacterId) -> Option<CharacterEntry>;

    /// Load the selected character's look and name before its stats arrive.
    fn load_player(&mut self, entry: &CharacterEntry);

    /// Decode the stat block. Must consume exactly the stat bytes.
    fn parse_stats(&mut self, packet: &mut InPacket<'_>) -> Result<(), WireError>;

    fn add_cooldown(&mut self, cooldown: Cooldown);

    /// Recompute derived stats from the stat block and the decoded session
    /// (equipment, skills) after a full bootstrap.
    fn recalc_stats(&mut self, session: &SessionState);

    /// The map and portal the stat block placed the player at.
    fn spawn_point(&self) -> SpawnPoint;

    /// Take ownership of everything the full bootstrap decoded, spawn point
    /// included.
    fn load_session(&mut self, session: SessionState);

    /// Queue a packet for the server.
    fn send(&mut self, packet: OutPacket);

    /// Switch from the login screens to the game screen.
    fn enter_game(&mut self) {}
}
