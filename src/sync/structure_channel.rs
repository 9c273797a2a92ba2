use log::{debug, warn};

use crate::{
    connection::transport::{MessageKind, Recipient, Transport},
    constants::MAX_PLAYERS,
    session::Session,
    sync::{config::SyncConfig, error::SyncError, sampler::StructureCursor, timer::ChannelTimer},
    types::{EntityId, GameTime, PeerId, TypeRef},
    wire::{Wire, WireReader, WireWriter},
    world::{
        structure::{BuildStatus, TilePos},
        world_type::World,
    },
};

/// Structure checking, to keep buildings consistent across peers. One
/// structure per cadence interval, walked round-robin over authoritative
/// owners; receivers overwrite health and heading, materialize structures
/// they are missing entirely, and converge capacity by stacking upgrade
/// modules one real construction step at a time.
pub struct StructureChannel {
    timer: ChannelTimer,
    cursor: StructureCursor,
    max_capacity: u8,
}

impl StructureChannel {
    pub fn new(config: &SyncConfig) -> Self {
        Self {
            timer: ChannelTimer::new(config.structure_interval),
            cursor: StructureCursor::new(),
            max_capacity: config.max_module_capacity,
        }
    }

    /// Paced send of the next structure under local authority. Only complete
    /// buildings are reported; partial construction never replicates.
    pub fn send_check(
        &mut self,
        now: GameTime,
        world: &dyn World,
        session: &dyn Session,
        transport: &mut dyn Transport,
    ) {
        if !self.timer.ready(now) {
            return;
        }

        let Some((owner, id)) = self.cursor.next(world, session) else {
            return;
        };
        let Some(structure) = world.structure(owner, id) else {
            return;
        };
        if !structure.is_built() {
            return;
        }

        let mut writer = WireWriter::new();
        MessageKind::StructureCheck.ser(&mut writer);
        writer.write_u8(structure.owner);
        writer.write_u32(structure.id);
        writer.write_u32(structure.health);
        writer.write_u32(structure.type_ref);
        writer.write_u16(structure.pos.x);
        writer.write_u16(structure.pos.y);
        writer.write_u16(structure.pos.z);
        writer.write_f32(structure.heading);

        if let Some(capacity) = structure.capacity {
            writer.write_u8(capacity);
        }

        transport.send(Recipient::Game, writer.to_bytes());
    }

    /// Process an incoming structure-check payload (kind byte already
    /// consumed).
    pub fn receive(
        &mut self,
        reader: &mut WireReader,
        world: &mut dyn World,
    ) -> Result<(), SyncError> {
        let owner = reader.read_u8()?;
        let id = reader.read_u32()?;
        let health = reader.read_u32()?;
        let type_ref = reader.read_u32()?;
        let x = reader.read_u16()?;
        let y = reader.read_u16()?;
        let z = reader.read_u16()?;
        let heading = reader.read_f32()?;

        if owner as usize >= MAX_PLAYERS {
            return Err(SyncError::OwnerOutOfRange {
                message: "structure check",
                owner,
            });
        }

        // If the structure exists our job is easy.
        if let Some(structure) = world.structure_mut(owner, id) {
            structure.health = health;
            structure.heading = heading;
        } else if !self.materialize(world, owner, id, type_ref, TilePos { x, y, z }, heading) {
            return Ok(());
        }

        // Make sure it's finished.
        if let Some(structure) = world.structure_mut(owner, id) {
            if structure.status != BuildStatus::Built {
                structure.heading = heading;
                structure.status = BuildStatus::Built;
            }
        }

        // Capacity-bearing types carry a trailing level byte; converge by
        // stacking upgrade modules, never overshooting.
        if world.type_has_capacity(type_ref) {
            let target = reader.read_u8()?;
            if target > self.max_capacity {
                return Err(SyncError::CapacityOutOfRange {
                    received: target,
                    max: self.max_capacity,
                });
            }

            let mut ours = world
                .structure(owner, id)
                .and_then(|s| s.capacity)
                .unwrap_or(0);
            while ours < target {
                world.upgrade_structure(owner, id);
                ours += 1;
            }
        }

        Ok(())
    }

    /// The referenced structure doesn't exist locally: repair the divergence
    /// by adopting, rebuilding or constructing. Returns whether a structure
    /// with the received id is now in place.
    fn materialize(
        &self,
        world: &mut dyn World,
        owner: PeerId,
        id: EntityId,
        type_ref: TypeRef,
        pos: TilePos,
        heading: f32,
    ) -> bool {
        debug!(
            "structure check failed for owner {} id {}, repairing (type {})",
            owner, id, type_ref
        );

        if !world.structure_type_exists(type_ref) {
            warn!("structure check references unknown type {}", type_ref);
            return false;
        }

        let occupying = world.structure_at(pos.x, pos.y);

        let Some((occ_owner, occ_id)) = occupying else {
            // Nothing exists there, so let's get building.
            let Some(new_id) = world.build_structure(owner, type_ref, pos, heading) else {
                warn!("failed to build missing structure of type {}", type_ref);
                return false;
            };
            world.reassign_structure_id(owner, new_id, id);
            return true;
        };

        let occ_type = match world.structure(occ_owner, occ_id) {
            Some(occ) => occ.type_ref,
            None => return false,
        };

        if occ_type == type_ref && occ_owner == owner {
            // Correct type and owner: adopt the received id and complete it.
            world.reassign_structure_id(owner, occ_id, id);
            if let Some(structure) = world.structure_mut(owner, id) {
                structure.heading = heading;
            }
            true
        } else if world.compatible_upgrade(occ_type, type_ref) {
            // A compatible partial type occupies the tile; rebuild as the
            // received type.
            world.demolish_structure(occ_owner, occ_id);
            let Some(new_id) = world.build_structure(owner, type_ref, pos, heading) else {
                warn!("failed to upgrade structure to type {}", type_ref);
                return false;
            };
            world.reassign_structure_id(owner, new_id, id);
            true
        } else {
            // Soft failure: the occupying structure is incompatible.
            warn!(
                "tile ({}, {}) holds an incompatible structure (type {}), skipping check",
                pos.x, pos.y, occ_type
            );
            false
        }
    }
}
