//! Replays a login and a map change against a headless client.
//!
//! ```text
//! RUST_LOG=debug cargo run -p headless-replay [client.json]
//! ```

use leafline::prelude::*;
use leafline::wire::PacketWriter;
use tracing::info;

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// Keeps just enough state to print a summary. The stat block is reduced
/// to `i32 map, u8 portal` and item records to `i32 id, i16 quantity`.
#[derive(Default)]
struct ReplayWorld {
    channel: u8,
    spawn: SpawnPoint,
    session: Option<SessionState>,
    cooldowns: Vec<Cooldown>,
    outbox: Vec<OutPacket>,
    in_game: bool,
}

impl ItemCodec for ReplayWorld {
    fn parse_item(
        &mut self,
        packet: &mut InPacket<'_>,
        category: InventoryType,
        slot: i16,
        inventory: &mut Inventory,
    ) -> Result<(), WireError> {
        let item_id = packet.read_i32()?;
        let quantity = packet.read_i16()?;
        inventory.add_item(category, slot, Item { item_id, quantity });
        Ok(())
    }
}

impl GameWorld for ReplayWorld {
    fn set_channel(&mut self, channel: u8) {
        self.channel = channel;
    }

    fn character_entry(&self, _id: CharacterId) -> Option<CharacterEntry> {
        None
    }

    fn load_player(&mut self, _entry: &CharacterEntry) {}

    fn parse_stats(&mut self, packet: &mut InPacket<'_>) -> Result<(), WireError> {
        let map_id = packet.read_i32()?;
        let portal_id = packet.read_u8()?;
        self.spawn = SpawnPoint::new(map_id, portal_id);
        Ok(())
    }

    fn add_cooldown(&mut self, cooldown: Cooldown) {
        self.cooldowns.push(cooldown);
    }

    fn load_session(&mut self, session: SessionState) {
        self.session = Some(session);
    }

    fn recalc_stats(&mut self, _session: &SessionState) {}

    fn spawn_point(&self) -> SpawnPoint {
        self.spawn
    }

    fn send(&mut self, packet: OutPacket) {
        info!(opcode = %packet.opcode(), len = packet.body().len(), "outbound");
        self.outbox.push(packet);
    }

    fn enter_game(&mut self) {
        self.in_game = true;
    }
}

// ---------------------------------------------------------------------------
// Recorded messages
// ---------------------------------------------------------------------------

fn frame(body: PacketWriter) -> Vec<u8> {
    let mut bytes = RecvOpcode::SetField.code().to_le_bytes().to_vec();
    bytes.extend_from_slice(body.as_bytes());
    bytes
}

fn login() -> Result<Vec<u8>, WireError> {
    let mut w = PacketWriter::new();
    w.write_i32(1).write_i8(1).write_i8(1).write_zeros(23);
    w.write_i32(1_000);
    w.write_i32(10_000).write_u8(0);
    w.write_u8(20).write_bool(false);

    w.write_i32(1_250).write_u8(24).write_u8(24).write_u8(24).write_u8(24).write_u8(24);
    w.write_zeros(8);
    w.write_i16(11).write_i32(1_302_000).write_i16(1).write_i16(0);
    w.write_i16(0);
    w.write_i16(0);
    w.write_zeros(2);
    w.write_i8(1).write_i32(2_000_000).write_i16(30).write_i8(0);
    w.write_i8(0).write_i8(0).write_i8(0);

    w.write_i16(1).write_i32(1_000).write_i32(1).write_i64(-1);
    w.write_i16(0);
    w.write_i16(1).write_i16(1_021).write_string("")?;
    w.write_i16(0);

    for _ in 0..4 {
        w.write_i16(0);
    }
    for _ in 0..15 {
        w.write_i32(999_999_999);
    }
    w.write_i32(0).write_u8(0).write_i16(0);
    w.write_i16(0).write_i16(0);
    Ok(frame(w))
}

fn change_map(map_id: i32, portal_id: u8) -> Vec<u8> {
    let mut w = PacketWriter::new();
    w.write_i32(1).write_i8(0).write_i8(0).write_zeros(3);
    w.write_i32(map_id).write_u8(portal_id);
    frame(w)
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ClientConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => ClientConfig::default(),
    };

    let dispatcher = Dispatcher::with_client_handlers();
    let mut client = Client::new(ReplayWorld::default(), HeadlessScene::default(), &config);
    let mut scheduler = FrameScheduler::new(&config.stage);

    for message in [login()?, change_map(100_000_000, 0)] {
        dispatcher.dispatch_frame(&mut client, &message)?;
        let frames = settle(&mut client.stage, &mut scheduler).await;
        info!(frames, scene = ?client.stage.hooks().current, "settled");
    }

    let world = &client.world;
    info!(
        channel = world.channel,
        in_game = world.in_game,
        sent = world.outbox.len(),
        cooldowns = world.cooldowns.len(),
        "replay finished"
    );
    if let Some(session) = &world.session {
        println!("{}", serde_json::to_string_pretty(session)?);
    }
    Ok(())
}
