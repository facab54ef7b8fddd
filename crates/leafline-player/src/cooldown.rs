//! Skill cooldowns.
//!
//! Cooldowns are not stored here. Each entry is handed to the caller the
//! moment it is decoded, and the player-state owner applies it directly.

use leafline_wire::{InPacket, WireError};
use serde::{Deserialize, Serialize};

/// A skill that cannot be used again yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldown {
    pub skill_id: i32,
    /// Remaining time in seconds.
    pub remaining: i16,
}

/// Decodes an `i16`-counted list of `(i32 skill id, i16 remaining)` pairs,
/// passing each one to `apply` in wire order.
pub fn parse_cooldowns(
    packet: &mut InPacket<'_>,
    mut apply: impl FnMut(Cooldown),
) -> Result<(), WireError> {
    let count = packet.read_i16()?;
    for _ in 0..count {
        let skill_id = packet.read_i32()?;
        let remaining = packet.read_i16()?;
        apply(Cooldown {
            skill_id,
            remaining,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use leafline_wire::PacketWriter;

    #[test]
    fn test_cooldowns_are_applied_in_order() {
        let mut w = PacketWriter::new();
        w.write_i16(2);
        w.write_i32(1_121_006).write_i16(30);
        w.write_i32(2_301_002).write_i16(4);
        let bytes = w.freeze();

        let mut seen = Vec::new();
        let mut p = InPacket::new(&bytes);
        parse_cooldowns(&mut p, |cd| seen.push(cd)).unwrap();

        assert_eq!(
            seen,
            vec![
                Cooldown { skill_id: 1_121_006, remaining: 30 },
                Cooldown { skill_id: 2_301_002, remaining: 4 },
            ]
        );
        assert!(p.is_exhausted());
    }

    #[test]
    fn test_truncated_entry_fails_after_applying_earlier_ones() {
        let mut w = PacketWriter::new();
        w.write_i16(2);
        w.write_i32(1).write_i16(1);
        w.write_i32(2);
        let bytes = w.freeze();

        let mut seen = 0;
        let mut p = InPacket::new(&bytes);
        let result = parse_cooldowns(&mut p, |_| seen += 1);
        assert!(matches!(result, Err(WireError::Overrun { .. })));
        assert_eq!(seen, 1);
    }
}
