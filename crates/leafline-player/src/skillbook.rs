//! Skills and their decoder.
//!
//! A skill record has no type byte. Whether it carries a master level is
//! decided by the skill id itself: the ten-thousands digit of the job part
//! of the id names the job advancement, and only fourth-job skills (digit
//! `2`) have a master level on the wire.
//!
//! ```text
//! i32 id, i32 level, i64 expiration [, i32 master_level if job_tier(id) == 2]
//! ```

use std::collections::BTreeMap;

use leafline_wire::{InPacket, WireError};
use serde::{Deserialize, Serialize};

/// The job-tier digit of a skill id: `(id % 100000) / 10000`.
///
/// Applied to every id as-is. An id that happens to produce `2` without
/// being a fourth-job skill is still read with a master level.
pub fn job_tier(skill_id: i32) -> i32 {
    (skill_id % 100_000) / 10_000
}

/// The record shape a skill id selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillKind {
    /// No master level on the wire.
    Standard,
    /// Followed by an `i32` master level.
    FourthJob { master_level: i32 },
}

impl SkillKind {
    /// Returns `true` when records for `skill_id` carry a master level.
    pub fn has_master_level(skill_id: i32) -> bool {
        job_tier(skill_id) == 2
    }
}

/// One learned skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub skill_id: i32,
    pub level: i32,
    pub expiration: i64,
    pub kind: SkillKind,
}

impl SkillEntry {
    /// Decodes a single record, reading the master level only when the id
    /// calls for it.
    pub fn read(packet: &mut InPacket<'_>) -> Result<Self, WireError> {
        let skill_id = packet.read_i32()?;
        let level = packet.read_i32()?;
        let expiration = packet.read_i64()?;
        let kind = if SkillKind::has_master_level(skill_id) {
            SkillKind::FourthJob {
                master_level: packet.read_i32()?,
            }
        } else {
            SkillKind::Standard
        };
        Ok(Self {
            skill_id,
            level,
            expiration,
            kind,
        })
    }

    /// Master level, or 0 for skills that have none.
    pub fn master_level(&self) -> i32 {
        match self.kind {
            SkillKind::Standard => 0,
            SkillKind::FourthJob { master_level } => master_level,
        }
    }
}

/// All skills a character has learned, by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skillbook {
    skills: BTreeMap<i32, SkillEntry>,
}

impl Skillbook {
    pub fn set_skill(&mut self, entry: SkillEntry) {
        self.skills.insert(entry.skill_id, entry);
    }

    pub fn get(&self, skill_id: i32) -> Option<&SkillEntry> {
        self.skills.get(&skill_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillEntry> {
        self.skills.values()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// Decodes an `i16`-counted list of skill records.
pub fn parse_skillbook(packet: &mut InPacket<'_>) -> Result<Skillbook, WireError> {
    let mut skills = Skillbook::default();
    let count = packet.read_i16()?;
    for _ in 0..count {
        skills.set_skill(SkillEntry::read(packet)?);
    }
    Ok(skills)
}

#[cfg(test)]
mod tests {
    use super::*;
    use leafline_wire::PacketWriter;

    #[test]
    fn test_job_tier_formula() {
        assert_eq!(job_tier(1_121_002), 2); // hero skill
        assert_eq!(job_tier(1_001_004), 0); // beginner-job skill
        assert_eq!(job_tier(2_311_003), 1);
        assert_eq!(job_tier(0), 0);
    }

    #[test]
    fn test_job_tier_keeps_sign_of_negative_ids() {
        // Truncating division: a negative id never lands on tier 2.
        assert_eq!(job_tier(-1_121_002), -2);
        assert!(!SkillKind::has_master_level(-1_121_002));
    }

    #[test]
    fn test_mixed_skillbook() {
        let mut w = PacketWriter::new();
        w.write_i16(2);
        w.write_i32(1_001_004).write_i32(3).write_i64(-1);
        w.write_i32(1_121_002).write_i32(10).write_i64(-1).write_i32(30);
        w.write_u8(0xEE);
        let bytes = w.freeze();

        let mut p = InPacket::new(&bytes);
        let book = parse_skillbook(&mut p).unwrap();

        assert_eq!(book.len(), 2);
        let basic = book.get(1_001_004).unwrap();
        assert_eq!(basic.kind, SkillKind::Standard);
        assert_eq!(basic.master_level(), 0);
        let fourth = book.get(1_121_002).unwrap();
        assert_eq!(fourth.kind, SkillKind::FourthJob { master_level: 30 });
        assert_eq!(fourth.level, 10);
        assert_eq!(p.read_u8().unwrap(), 0xEE);
    }

    #[test]
    fn test_coincidental_tier_two_id_reads_master_level() {
        // 20_000 is not a real fourth-job skill, but the digit says 2.
        let mut w = PacketWriter::new();
        w.write_i32(20_000).write_i32(1).write_i64(0).write_i32(5);
        let bytes = w.freeze();

        let mut p = InPacket::new(&bytes);
        let entry = SkillEntry::read(&mut p).unwrap();
        assert_eq!(entry.master_level(), 5);
        assert!(p.is_exhausted());
    }
}
