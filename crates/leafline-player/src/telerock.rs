//! Teleport rock destinations.
//!
//! Two fixed-size lists with no count prefix: 5 regular map ids, then 10
//! VIP map ids. Unused entries are sent as a placeholder map id.

use leafline_wire::{InPacket, WireError};
use serde::{Deserialize, Serialize};

/// Number of regular destinations.
pub const TELEROCK_SLOTS: usize = 5;
/// Number of VIP destinations.
pub const TELEROCK_VIP_SLOTS: usize = 10;

/// Saved teleport destinations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Telerock {
    pub locations: [i32; TELEROCK_SLOTS],
    pub vip_locations: [i32; TELEROCK_VIP_SLOTS],
}

/// Reads exactly 5 + 10 map ids.
pub fn parse_telerock(packet: &mut InPacket<'_>) -> Result<Telerock, WireError> {
    let mut rock = Telerock::default();
    for slot in &mut rock.locations {
        *slot = packet.read_i32()?;
    }
    for slot in &mut rock.vip_locations {
        *slot = packet.read_i32()?;
    }
    Ok(rock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use leafline_wire::PacketWriter;

    #[test]
    fn test_reads_fifteen_ids_and_stops() {
        let mut w = PacketWriter::new();
        for id in 0..16 {
            w.write_i32(100_000_000 + id);
        }
        let bytes = w.freeze();

        let mut p = InPacket::new(&bytes);
        let rock = parse_telerock(&mut p).unwrap();

        assert_eq!(
            rock.locations,
            [100_000_000, 100_000_001, 100_000_002, 100_000_003, 100_000_004]
        );
        assert_eq!(rock.vip_locations[0], 100_000_005);
        assert_eq!(rock.vip_locations[9], 100_000_014);
        assert_eq!(p.remaining(), 4);
    }

    #[test]
    fn test_fourteen_ids_overrun() {
        let mut w = PacketWriter::new();
        for _ in 0..14 {
            w.write_i32(999_999_999);
        }
        let bytes = w.freeze();

        let mut p = InPacket::new(&bytes);
        assert!(parse_telerock(&mut p).is_err());
    }
}
