//! End-to-end field entry through the dispatcher.
//!
//! `RecordingWorld` plays the game-state owner: it keeps what it is handed
//! and logs every call so ordering can be checked. Its stat block is a
//! stand-in `i32 map, u8 portal`, and its item records are
//! `i32 item id, i16 quantity`.

use leafline::prelude::*;
use leafline::wire::PacketWriter;

// =========================================================================
// Helpers
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Channel(u8),
    LoadPlayer(CharacterId),
    Stats,
    Cooldown(i32),
    Session,
    Recalc,
    Sent(SendOpcode),
    EnterGame,
}

#[derive(Default)]
struct RecordingWorld {
    events: Vec<Event>,
    selected: Option<CharacterEntry>,
    spawn: SpawnPoint,
    session: Option<SessionState>,
    sent: Vec<OutPacket>,
    cooldowns: Vec<Cooldown>,
}

impl ItemCodec for RecordingWorld {
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

impl GameWorld for RecordingWorld {
    fn set_channel(&mut self, channel: u8) {
        self.events.push(Event::Channel(channel));
    }

    fn character_entry(&self, _id: CharacterId) -> Option<CharacterEntry> {
        self.selected.clone()
    }

    fn load_player(&mut self, entry: &CharacterEntry) {
        self.events.push(Event::LoadPlayer(entry.id));
    }

    fn parse_stats(&mut self, packet: &mut InPacket<'_>) -> Result<(), WireError> {
        let map_id = packet.read_i32()?;
        let portal_id = packet.read_u8()?;
        self.spawn = SpawnPoint::new(map_id, portal_id);
        self.events.push(Event::Stats);
        Ok(())
    }

    fn add_cooldown(&mut self, cooldown: Cooldown) {
        self.events.push(Event::Cooldown(cooldown.skill_id));
        self.cooldowns.push(cooldown);
    }

    fn recalc_stats(&mut self, session: &SessionState) {
        assert_eq!(session.character_id, CharacterId(77));
        self.events.push(Event::Recalc);
    }

    fn load_session(&mut self, session: SessionState) {
        self.events.push(Event::Session);
        self.session = Some(session);
    }

    fn spawn_point(&self) -> SpawnPoint {
        self.spawn
    }

    fn send(&mut self, packet: OutPacket) {
        self.events.push(Event::Sent(packet.opcode()));
        self.sent.push(packet);
    }

    fn enter_game(&mut self) {
        self.events.push(Event::EnterGame);
    }
}

type TestClient = Client<RecordingWorld, HeadlessScene>;

fn client() -> TestClient {
    Client::new(
        RecordingWorld::default(),
        HeadlessScene::default(),
        &ClientConfig::default(),
    )
}

fn frame(body: &PacketWriter) -> Vec<u8> {
    let mut bytes = RecvOpcode::SetField.code().to_le_bytes().to_vec();
    bytes.extend_from_slice(body.as_bytes());
    bytes
}

fn change_map(channel: i32, map_id: i32, portal_id: u8) -> PacketWriter {
    let mut w = PacketWriter::new();
    w.write_i32(channel).write_i8(0).write_i8(0);
    w.write_zeros(3);
    w.write_i32(map_id).write_u8(portal_id);
    w
}

/// A complete bootstrap body for character 77, spawning at map 104000000
/// portal 2, with at least one entry in every block.
fn bootstrap(character_id: i32) -> PacketWriter {
    let mut w = PacketWriter::new();
    w.write_i32(2).write_i8(1).write_i8(1);
    w.write_zeros(23);
    w.write_i32(character_id);

    // stats
    w.write_i32(104_000_000).write_u8(2);

    // buddy capacity, linked name
    w.write_u8(20);
    w.write_bool(true);
    w.write_string("Ranger").unwrap();

    // inventory: meso, five slot maxima, reserved
    w.write_i32(5_000);
    for max in [24, 24, 24, 24, 48] {
        w.write_u8(max);
    }
    w.write_zeros(8);
    // worn, cash worn, stored equipment
    w.write_i16(5).write_i32(1_040_002).write_i16(1);
    w.write_i16(0);
    w.write_i16(0);
    w.write_i16(3).write_i32(1_302_000).write_i16(1);
    w.write_i16(0);
    w.write_zeros(2);
    // use, setup, etc, cash
    w.write_i8(1).write_i32(2_000_000).write_i16(50);
    w.write_i8(0);
    w.write_i8(0);
    w.write_i8(0);
    w.write_i8(0);

    // skills: one regular, one fourth-job with a master level
    w.write_i16(2);
    w.write_i32(1_001_004).write_i32(3).write_i64(-1);
    w.write_i32(3_121_002).write_i32(10).write_i64(-1).write_i32(30);

    // cooldowns
    w.write_i16(1);
    w.write_i32(3_121_002).write_i16(12);

    // quests: 1000 started with one progress record, 2000 started
    w.write_i16(2);
    w.write_i16(1000).write_string("s").unwrap();
    w.write_i16(1000).write_string("p1").unwrap();
    w.write_i16(2000).write_string("t").unwrap();
    w.write_i16(1);
    w.write_i16(3000).write_i64(1_234);

    // minigame, couple rings
    w.write_i16(0);
    w.write_i16(1);
    w.write_i32(1).write_padded_string("Partner", 13).unwrap();
    w.write_i32(0).write_i32(0).write_i32(0).write_i32(0);
    // friendship, marriage rings
    w.write_i16(0);
    w.write_i16(0);

    // teleport rock
    for i in 0..5 {
        w.write_i32(100_000_000 + i);
    }
    for _ in 0..10 {
        w.write_i32(999_999_999);
    }

    // monster book
    w.write_i32(9_000_001).write_u8(0);
    w.write_i16(1).write_i16(42).write_i8(3);

    // new-year cards, area info
    w.write_i16(0);
    w.write_i16(1).write_i16(7).write_string("1=1").unwrap();
    w
}

// =========================================================================
// Change map
// =========================================================================

#[test]
fn test_change_map_end_to_end() {
    let dispatcher = Dispatcher::with_client_handlers();
    let mut client = client();

    let result = dispatcher
        .dispatch_frame(&mut client, &frame(&change_map(1, 100_000_000, 0)))
        .unwrap();

    assert_eq!(result, Dispatched::Handled);
    assert!(client.stage.is_transitioning());
    assert!(client.stage.is_locked());
    assert_eq!(client.world.sent.len(), 1);
    assert_eq!(client.world.sent[0].opcode(), SendOpcode::PlayerUpdate);
    assert_eq!(
        client.world.events,
        vec![Event::Channel(1), Event::Sent(SendOpcode::PlayerUpdate)]
    );

    while !client.stage.is_settled() {
        client.stage.tick();
    }
    assert_eq!(client.stage.hooks().current, Some((100_000_000, 0)));
    assert_eq!(client.stage.hooks().loads, 1);
}

#[test]
fn test_change_map_returns_spawn() {
    let mut client = client();
    let body = change_map(3, 211_000_000, 5);
    let mut packet = InPacket::new(body.as_bytes());

    let entry = SetFieldHandler.enter_field(&mut client, &mut packet).unwrap();

    assert_eq!(entry, FieldEntry::ChangedMap(SpawnPoint::new(211_000_000, 5)));
    assert!(packet.is_exhausted());
    assert!(client.world.session.is_none());
}

#[test]
fn test_change_map_truncated_by_one_byte() {
    let dispatcher = Dispatcher::with_client_handlers();
    let mut client = client();
    let mut bytes = frame(&change_map(1, 100_000_000, 0));
    bytes.pop();

    let err = dispatcher.dispatch_frame(&mut client, &bytes).unwrap_err();

    assert!(matches!(
        err,
        LeaflineError::Wire(WireError::Overrun { wanted: 1, remaining: 0, .. })
    ));
    assert!(!client.stage.is_transitioning());
    assert!(client.world.sent.is_empty());
}

// =========================================================================
// Full bootstrap
// =========================================================================

#[test]
fn test_bootstrap_end_to_end() {
    let dispatcher = Dispatcher::with_client_handlers();
    let mut client = client();
    client.world.selected = Some(CharacterEntry {
        id: CharacterId(77),
        name: "Ranger".into(),
    });

    dispatcher
        .dispatch_frame(&mut client, &frame(&bootstrap(77)))
        .unwrap();

    assert_eq!(
        client.world.events,
        vec![
            Event::Channel(2),
            Event::LoadPlayer(CharacterId(77)),
            Event::Stats,
            Event::Cooldown(3_121_002),
            Event::Recalc,
            Event::Session,
            Event::Sent(SendOpcode::PlayerUpdate),
            Event::EnterGame,
        ]
    );

    let session = client.world.session.as_ref().unwrap();
    assert_eq!(session.channel, 2);
    assert_eq!(session.character_id, CharacterId(77));
    assert_eq!(session.spawn, SpawnPoint::new(104_000_000, 2));
    assert_eq!(session.buddy_capacity, 20);
    assert_eq!(session.linked_name.as_deref(), Some("Ranger"));

    let inv = &session.inventory;
    assert_eq!(inv.meso(), 5_000);
    assert_eq!(inv.slot_max(InventoryType::Cash), 48);
    assert_eq!(inv.item(InventoryType::Equipped, 5).unwrap().item_id, 1_040_002);
    assert_eq!(inv.item(InventoryType::Equip, 3).unwrap().item_id, 1_302_000);
    assert_eq!(inv.item(InventoryType::Use, 1).unwrap().quantity, 50);

    assert_eq!(session.skillbook.len(), 2);
    assert_eq!(session.skillbook.get(1_001_004).unwrap().master_level(), 0);
    assert_eq!(session.skillbook.get(3_121_002).unwrap().master_level(), 30);

    assert_eq!(session.questlog.started_count(), 2);
    assert_eq!(session.questlog.progress(1000).len(), 1);
    assert_eq!(session.questlog.completed(3000), Some(1_234));

    assert_eq!(session.telerock.locations[4], 100_000_004);
    assert_eq!(session.telerock.vip_locations[9], 999_999_999);
    assert_eq!(session.monsterbook.cover(), 9_000_001);
    assert_eq!(session.monsterbook.card_level(42), Some(3));

    while !client.stage.is_settled() {
        client.stage.tick();
    }
    assert_eq!(client.stage.hooks().current, Some((104_000_000, 2)));
}

#[test]
fn test_bootstrap_without_selection_screen() {
    let mut client = client();
    let body = bootstrap(77);
    let mut packet = InPacket::new(body.as_bytes());

    let entry = SetFieldHandler.enter_field(&mut client, &mut packet).unwrap();

    assert_eq!(entry, FieldEntry::Bootstrapped(SpawnPoint::new(104_000_000, 2)));
    assert!(packet.is_exhausted());
    assert!(!client.world.events.contains(&Event::LoadPlayer(CharacterId(77))));
}

#[test]
fn test_stale_selection_is_a_silent_no_op() {
    let mut client = client();
    client.world.selected = Some(CharacterEntry {
        id: CharacterId(1),
        name: "Other".into(),
    });
    let body = bootstrap(77);
    let mut packet = InPacket::new(body.as_bytes());

    let entry = SetFieldHandler.enter_field(&mut client, &mut packet).unwrap();

    assert_eq!(entry, FieldEntry::StaleSelection(CharacterId(77)));
    assert_eq!(client.world.events, vec![Event::Channel(2)]);
    assert!(client.world.sent.is_empty());
    assert!(!client.stage.is_transitioning());
}

#[test]
fn test_bootstrap_truncated_anywhere_fails() {
    let full = bootstrap(77);
    let bytes = full.as_bytes();
    // Cutting at any block boundary must fail, never misread.
    for cut in [10, 40, 60, 120, bytes.len() - 1] {
        let mut client = client();
        let mut packet = InPacket::new(&bytes[..cut]);
        let err = SetFieldHandler.enter_field(&mut client, &mut packet).unwrap_err();
        assert!(matches!(err, LeaflineError::Wire(WireError::Overrun { .. })), "cut {cut}");
        assert!(client.world.session.is_none());
        assert!(!client.stage.is_transitioning());
    }
}

#[test]
fn test_trailing_bytes_are_left_unread() {
    let mut w = bootstrap(77);
    w.write_u8(0xEE);
    let mut client = client();
    let mut packet = InPacket::new(w.as_bytes());

    SetFieldHandler.enter_field(&mut client, &mut packet).unwrap();

    assert_eq!(packet.remaining(), 1);
    assert_eq!(packet.read_u8().unwrap(), 0xEE);
}

// =========================================================================
// Dispatch
// =========================================================================

#[test]
fn test_unknown_opcode_is_ignored() {
    let dispatcher = Dispatcher::with_client_handlers();
    let mut client = client();

    let result = dispatcher.dispatch(&mut client, 0x0001, &[0xFF; 4]).unwrap();

    assert_eq!(result, Dispatched::Ignored);
    assert!(client.world.events.is_empty());
    assert!(client.stage.is_settled());
}

#[tokio::test(start_paused = true)]
async fn test_settle_after_field_entry() {
    let dispatcher = Dispatcher::with_client_handlers();
    let config = ClientConfig::from_json(r#"{ "stage": { "fade_step": 0.25 } }"#).unwrap();
    let mut client = Client::new(RecordingWorld::default(), HeadlessScene::default(), &config);
    let mut scheduler = FrameScheduler::new(&config.stage);

    dispatcher
        .dispatch_frame(&mut client, &frame(&change_map(1, 100_000_000, 0)))
        .unwrap();
    let frames = settle(&mut client.stage, &mut scheduler).await;

    assert_eq!(frames, 8);
    assert_eq!(client.stage.hooks().current, Some((100_000_000, 0)));
}
