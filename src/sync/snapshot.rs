use crate::{
    types::{EntityId, GameTime, PeerId},
    wire::{error::WireError, Wire, WireReader, WireWriter},
    world::unit::{Command, Unit},
};

/// Immutable, timestamped copy of the reconciled subset of one unit's fields
/// at the instant it was sampled. Owned by the unit it was taken from and
/// replaced wholesale on each new sampling; used only as the baseline for
/// the next matching incoming check.
///
/// Wire layout (inside a `CHECK_MOVABLE` batch, in order): owner, id,
/// health, heading, experience, posX, posY, command, secondary flags. The
/// timestamp travels once per batch as the reference time, not per entry.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSnapshot {
    pub game_time: GameTime,
    pub owner: PeerId,
    pub id: EntityId,
    pub health: u32,
    pub heading: f32,
    pub experience: f32,
    pub pos_x: f32,
    pub pos_y: f32,
    pub command: Command,
    pub secondary_order: u32,
}

impl UnitSnapshot {
    /// Capture a unit at the current logical time. Pure read; the caller is
    /// responsible for storing the result as the unit's baseline.
    pub fn package(unit: &Unit, now: GameTime) -> Self {
        Self {
            game_time: now,
            owner: unit.owner,
            id: unit.id,
            health: unit.health,
            heading: unit.heading,
            experience: unit.experience,
            pos_x: unit.soft_x,
            pos_y: unit.soft_y,
            command: unit.command,
            secondary_order: unit.secondary_order,
        }
    }

    pub fn ser(&self, writer: &mut WireWriter) {
        writer.write_u8(self.owner);
        writer.write_u32(self.id);
        writer.write_u32(self.health);
        writer.write_f32(self.heading);
        writer.write_f32(self.experience);
        writer.write_f32(self.pos_x);
        writer.write_f32(self.pos_y);
        self.command.ser(writer);
        writer.write_u32(self.secondary_order);
    }

    /// Decode one batch entry, stamping it with the batch's reference time.
    pub fn de(reader: &mut WireReader, ref_time: GameTime) -> Result<Self, WireError> {
        Ok(Self {
            game_time: ref_time,
            owner: reader.read_u8()?,
            id: reader.read_u32()?,
            health: reader.read_u32()?,
            heading: reader.read_f32()?,
            experience: reader.read_f32()?,
            pos_x: reader.read_f32()?,
            pos_y: reader.read_f32()?,
            command: Command::de(reader)?,
            secondary_order: reader.read_u32()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_reads_soft_position() {
        let mut unit = Unit::new(2, 7, 10.0, 20.0);
        unit.soft_x = 11.5;
        unit.soft_y = 21.5;
        unit.health = 80;
        unit.set_heading(45.0);
        unit.experience = 3.25;
        unit.command = Command::Attack { target: 99 };
        unit.secondary_order = 0x10;

        let snapshot = UnitSnapshot::package(&unit, 4500);

        assert_eq!(snapshot.game_time, 4500);
        assert_eq!(snapshot.owner, 2);
        assert_eq!(snapshot.id, 7);
        assert_eq!(snapshot.pos_x, 11.5);
        assert_eq!(snapshot.pos_y, 21.5);
        assert_eq!(snapshot.command, Command::Attack { target: 99 });
    }

    #[test]
    fn entry_round_trip() {
        let unit = Unit::new(1, 42, 5.0, 6.0);
        let snapshot = UnitSnapshot::package(&unit, 9000);

        let mut writer = WireWriter::new();
        snapshot.ser(&mut writer);
        let buffer = writer.to_bytes();

        let mut reader = WireReader::new(&buffer);
        let decoded = UnitSnapshot::de(&mut reader, 9000).unwrap();

        assert_eq!(decoded, snapshot);
        assert_eq!(reader.remaining(), 0);
    }
}
