//! Builders for the requests the client sends to the server.
//!
//! Each function returns a finished [`OutPacket`]; handing it to the
//! connection is the caller's job.

use crate::{OutPacket, SendOpcode, WireError};

/// The "player state changed" notification. Carries no payload.
///
/// Sent after every field entry so the server re-broadcasts the player.
pub fn player_update() -> OutPacket {
    OutPacket::new(SendOpcode::PlayerUpdate)
}

/// Opens a conversation with the NPC whose map object id is `object_id`.
pub fn talk_to_npc(object_id: i32) -> OutPacket {
    let mut packet = OutPacket::new(SendOpcode::TalkToNpc);
    packet.writer().write_i32(object_id);
    packet
}

/// Answers the current NPC dialogue page.
///
/// `last_msg` is the dialogue type being answered and `response` the
/// button pressed.
pub fn npc_talk_more(last_msg: i8, response: i8) -> OutPacket {
    let mut packet = OutPacket::new(SendOpcode::NpcTalkMore);
    packet.writer().write_i8(last_msg).write_i8(response);
    packet
}

/// Answers a free-text NPC prompt.
pub fn npc_talk_text(response: &str) -> Result<OutPacket, WireError> {
    let mut packet = npc_talk_more(2, 1);
    packet.writer().write_string(response)?;
    Ok(packet)
}

/// Answers an NPC selection menu with the chosen entry.
pub fn npc_talk_selection(selection: i32) -> OutPacket {
    let mut packet = npc_talk_more(4, 1);
    packet.writer().write_i32(selection);
    packet
}

// ---------------------------------------------------------------------------
// NPC shop
// ---------------------------------------------------------------------------

/// What to do in an open NPC shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopAction {
    Buy { slot: i16, item_id: i32, quantity: i16 },
    Sell { slot: i16, item_id: i32, quantity: i16 },
    /// Refill a rechargeable item (stars, bullets).
    Recharge { slot: i16 },
    Leave,
}

impl ShopAction {
    fn mode(self) -> i8 {
        match self {
            Self::Buy { .. } => 0,
            Self::Sell { .. } => 1,
            Self::Recharge { .. } => 2,
            Self::Leave => 3,
        }
    }
}

/// Builds an NPC shop request.
pub fn npc_shop_action(action: ShopAction) -> OutPacket {
    let mut packet = OutPacket::new(SendOpcode::NpcShopAction);
    let w = packet.writer();
    w.write_i8(action.mode());
    match action {
        ShopAction::Buy {
            slot,
            item_id,
            quantity,
        }
        | ShopAction::Sell {
            slot,
            item_id,
            quantity,
        } => {
            w.write_i16(slot).write_i32(item_id).write_i16(quantity);
        }
        ShopAction::Recharge { slot } => {
            w.write_i16(slot);
        }
        ShopAction::Leave => {}
    }
    packet
}
