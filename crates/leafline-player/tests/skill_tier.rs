//! Property tests for the skill record shape.
//!
//! The master-level field is present for exactly the ids whose job-tier
//! digit is 2, and absent (zero extra bytes) for every other id.

use leafline_player::{SkillEntry, SkillKind, job_tier};
use leafline_wire::{InPacket, PacketWriter};
use proptest::prelude::*;

fn encode(skill_id: i32, level: i32, expiration: i64, extra: Option<i32>) -> Vec<u8> {
    let mut w = PacketWriter::new();
    w.write_i32(skill_id).write_i32(level).write_i64(expiration);
    if let Some(master) = extra {
        w.write_i32(master);
    }
    // Sentinel so an over-read would be visible.
    w.write_u32(0xDEAD_BEEF);
    w.freeze().to_vec()
}

proptest! {
    #[test]
    fn tier_two_ids_consume_master_level(
        base in 0i32..21_474,
        rest in 0i32..10_000,
        level in any::<i32>(),
        master in any::<i32>(),
    ) {
        // Force the ten-thousands digit of the job part to 2.
        let skill_id = base * 100_000 + 20_000 + rest;
        prop_assert_eq!(job_tier(skill_id), 2);

        let bytes = encode(skill_id, level, -1, Some(master));
        let mut p = InPacket::new(&bytes);
        let entry = SkillEntry::read(&mut p).unwrap();

        prop_assert_eq!(entry.kind, SkillKind::FourthJob { master_level: master });
        prop_assert_eq!(p.read_u32().unwrap(), 0xDEAD_BEEF);
    }

    #[test]
    fn other_ids_do_not_consume_master_level(
        skill_id in any::<i32>().prop_filter("not tier 2", |id| job_tier(*id) != 2),
        level in any::<i32>(),
    ) {
        let bytes = encode(skill_id, level, 0, None);
        let mut p = InPacket::new(&bytes);
        let entry = SkillEntry::read(&mut p).unwrap();

        prop_assert_eq!(entry.kind, SkillKind::Standard);
        prop_assert_eq!(entry.master_level(), 0);
        prop_assert_eq!(p.position(), 16);
        prop_assert_eq!(p.read_u32().unwrap(), 0xDEAD_BEEF);
    }
}

#[test]
fn regression_formula_is_fixed() {
    // Pinned values: these ids are classified by arithmetic alone.
    for (id, tier) in [
        (1_121_002, 2),
        (4_120_002, 2),
        (2_121_005, 2),
        (5_221_000, 2),
        (20_000, 2),
        (1_101_004, 0),
        (3_111_002, 1),
        (120_000, 2),
    ] {
        assert_eq!(job_tier(id), tier, "id {id}");
    }
}
