//! Field entry: the message that places the player on a map.
//!
//! The same opcode serves two purposes, told apart by two mode bytes:
//!
//! ```text
//! i32 channel, i8 mode1, i8 mode2
//!   both zero → change map:  3 reserved, i32 map id, u8 portal
//!   otherwise → bootstrap:  23 reserved, i32 character id, stats,
//!                           u8 buddy capacity, [bool + string] linked name,
//!                           inventory, skills, cooldowns, quests,
//!                           minigame, 3 × rings, teleport rock,
//!                           monster book, new-year cards, area info
//! ```
//!
//! The bootstrap blocks follow each other with no framing, so they are
//! decoded strictly in this order.

use std::fmt;

use leafline_player::{
    CharacterId, ReservedBlock, SessionState, SpawnPoint, parse_cooldowns, parse_inventory,
    parse_monsterbook, parse_questlog, parse_skillbook, parse_telerock,
};
use leafline_stage::SceneHooks;
use leafline_wire::{InPacket, packets};
use tracing::{debug, info};

use crate::{Client, GameWorld, LeaflineError, PacketHandler};

/// Bytes between the mode bytes and the map id of a map change.
pub const CHANGE_MAP_RESERVED: usize = 3;
/// Bytes between the mode bytes and the character id of a bootstrap.
pub const BOOTSTRAP_RESERVED: usize = 23;

/// The two forms of the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldMode {
    ChangeMap,
    Bootstrap,
}

impl FieldMode {
    fn classify(mode1: i8, mode2: i8) -> Self {
        if mode1 == 0 && mode2 == 0 {
            FieldMode::ChangeMap
        } else {
            FieldMode::Bootstrap
        }
    }
}

/// What a field-entry message did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEntry {
    /// The player moved to another map.
    ChangedMap(SpawnPoint),
    /// The full character state was loaded and the game screen entered.
    Bootstrapped(SpawnPoint),
    /// The message named a character other than the selected one. Nothing
    /// past the character id was read.
    StaleSelection(CharacterId),
}

impl fmt::Display for FieldEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldEntry::ChangedMap(spawn) => write!(f, "changed map to {spawn}"),
            FieldEntry::Bootstrapped(spawn) => write!(f, "bootstrapped at {spawn}"),
            FieldEntry::StaleSelection(id) => write!(f, "stale selection {id}"),
        }
    }
}

/// Handler for [`RecvOpcode::SetField`](leafline_wire::RecvOpcode::SetField).
#[derive(Debug, Clone, Copy, Default)]
pub struct SetFieldHandler;

impl SetFieldHandler {
    /// Decodes one field-entry message and applies it.
    ///
    /// # Errors
    /// The first [`WireError`](leafline_wire::WireError) from any block.
    /// Records decoded before the failure may already have reached the
    /// world (the channel, the stat block, cooldowns).
    pub fn enter_field<W: GameWorld, H: SceneHooks>(
        &self,
        client: &mut Client<W, H>,
        packet: &mut InPacket<'_>,
    ) -> Result<FieldEntry, LeaflineError> {
        // Sent widened to an i32; only the low byte is meaningful.
        let channel = packet.read_i32()? as u8;
        client.world.set_channel(channel);

        let mode1 = packet.read_i8()?;
        let mode2 = packet.read_i8()?;
        let mode = FieldMode::classify(mode1, mode2);
        debug!(channel, mode1, mode2, ?mode, "field entry");

        let entry = match mode {
            FieldMode::ChangeMap => Self::change_map(client, packet)?,
            FieldMode::Bootstrap => Self::bootstrap(client, packet, channel)?,
        };
        info!(%entry, "field entry handled");
        Ok(entry)
    }

    fn change_map<W: GameWorld, H: SceneHooks>(
        client: &mut Client<W, H>,
        packet: &mut InPacket<'_>,
    ) -> Result<FieldEntry, LeaflineError> {
        packet.skip(CHANGE_MAP_RESERVED)?;
        let map_id = packet.read_i32()?;
        let portal_id = packet.read_u8()?;

        client.stage.begin_transition(map_id, portal_id);
        client.world.send(packets::player_update());

        Ok(FieldEntry::ChangedMap(SpawnPoint::new(map_id, portal_id)))
    }

    fn bootstrap<W: GameWorld, H: SceneHooks>(
        client: &mut Client<W, H>,
        packet: &mut InPacket<'_>,
        channel: u8,
    ) -> Result<FieldEntry, LeaflineError> {
        packet.skip(BOOTSTRAP_RESERVED)?;

        let character_id = CharacterId(packet.read_i32()?);
        if let Some(entry) = client.world.character_entry(character_id) {
            if entry.id != character_id {
                debug!(%character_id, selected = %entry.id, "field entry for another character");
                return Ok(FieldEntry::StaleSelection(character_id));
            }
            client.world.load_player(&entry);
        }

        let world = &mut client.world;
        world.parse_stats(packet)?;

        let buddy_capacity = packet.read_u8()?;
        let linked_name = if packet.read_bool()? {
            Some(packet.read_string()?)
        } else {
            None
        };

        let inventory = parse_inventory(packet, world)?;
        let skillbook = parse_skillbook(packet)?;
        parse_cooldowns(packet, |cooldown| world.add_cooldown(cooldown))?;
        let questlog = parse_questlog(packet)?;

        ReservedBlock::Minigame.discard(packet)?;
        ReservedBlock::CoupleRing.discard(packet)?;
        ReservedBlock::FriendshipRing.discard(packet)?;
        ReservedBlock::MarriageRing.discard(packet)?;

        let telerock = parse_telerock(packet)?;
        let monsterbook = parse_monsterbook(packet)?;

        ReservedBlock::NewYearCards.discard(packet)?;
        ReservedBlock::AreaInfo.discard(packet)?;

        if !packet.is_exhausted() {
            debug!(trailing = packet.remaining(), "unread bytes after field entry");
        }

        let mut session = SessionState {
            channel,
            character_id,
            spawn: SpawnPoint::default(),
            buddy_capacity,
            linked_name,
            inventory,
            skillbook,
            questlog,
            telerock,
            monsterbook,
        };
        world.recalc_stats(&session);
        let spawn = world.spawn_point();
        session.spawn = spawn;
        world.load_session(session);

        client.stage.begin_transition(spawn.map_id, spawn.portal_id);
        client.world.send(packets::player_update());
        client.world.enter_game();

        Ok(FieldEntry::Bootstrapped(spawn))
    }
}

impl<W: GameWorld, H: SceneHooks> PacketHandler<Client<W, H>> for SetFieldHandler {
    fn handle(
        &self,
        ctx: &mut Client<W, H>,
        packet: &mut InPacket<'_>,
    ) -> Result<(), LeaflineError> {
        self.enter_field(ctx, packet).map(|_| ())
    }
}
