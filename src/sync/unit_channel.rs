use log::debug;

use crate::{
    connection::transport::{MessageKind, Recipient, Transport},
    constants::MAX_PLAYERS,
    session::Session,
    sync::{
        config::SyncConfig, error::SyncError, mute::OutboundMute, sampler::UnitPicker,
        snapshot::UnitSnapshot, timer::ChannelTimer,
    },
    types::GameTime,
    wire::{Wire, WireReader, WireWriter},
    world::{unit::Command, world_type::World},
};

/// The mandatory movement channel: keeps unit position and damage in sync.
///
/// Sending samples a batch of units, stores each one's snapshot as the next
/// reconciliation baseline, and broadcasts the snapshots of locally
/// authoritative units. Receiving merges a peer's snapshots into the local
/// replica field by field: additive deltas for kinematics and vitals so
/// local-only smoothing is preserved, authoritative overwrite with a
/// re-issued command for orders.
pub struct UnitChannel {
    timer: ChannelTimer,
    picker: UnitPicker,
    batch_size: usize,
    cooldown: GameTime,
    mute: OutboundMute,
}

impl UnitChannel {
    pub fn new(config: &SyncConfig, seed: u64) -> Self {
        Self {
            timer: ChannelTimer::new(config.unit_interval),
            picker: UnitPicker::new(seed, config.owner_pick_retries),
            batch_size: config.unit_batch_size,
            cooldown: config.snapshot_cooldown,
            mute: OutboundMute::new(),
        }
    }

    /// A clone of the suppression flag, for the simulation side to consult
    /// from inside command handlers.
    pub fn mute_handle(&self) -> OutboundMute {
        self.mute.clone()
    }

    /// Paced batch send. Every picked unit gets a fresh baseline stored,
    /// responsible or not: the pick stream is seeded identically on all
    /// peers, so this is what arms the receiving side's baseline too.
    pub fn send_check(
        &mut self,
        now: GameTime,
        world: &mut dyn World,
        session: &dyn Session,
        transport: &mut dyn Transport,
    ) {
        if self.mute.engaged() {
            return;
        }
        if !self.timer.ready(now) {
            return;
        }

        let mut batch: Vec<UnitSnapshot> = Vec::new();

        for _ in 0..self.batch_size {
            let Some((owner, id)) = self.picker.pick(world) else {
                continue;
            };
            let Some(unit) = world.unit_mut(owner, id) else {
                continue;
            };

            // Skip units snapshotted recently.
            if let Some(baseline) = &unit.baseline {
                if baseline.game_time + self.cooldown > now {
                    continue;
                }
            }

            let snapshot = UnitSnapshot::package(unit, now);
            if session.is_responsible(owner) {
                batch.push(snapshot.clone());
            }
            unit.baseline = Some(snapshot);
        }

        let mut writer = WireWriter::new();
        MessageKind::UnitCheck.ser(&mut writer);
        writer.write_u8(batch.len() as u8);
        writer.write_u32(now);
        for snapshot in &batch {
            snapshot.ser(&mut writer);
        }
        transport.send(Recipient::Game, writer.to_bytes());
    }

    /// Synchronize one specific unit right now, bypassing batching and
    /// cadence. No baseline is stored. A no-op while suppression is engaged,
    /// so a correction being applied cannot re-emit itself.
    pub fn force_send(
        &mut self,
        now: GameTime,
        unit: &crate::world::unit::Unit,
        transport: &mut dyn Transport,
    ) {
        if self.mute.engaged() {
            return;
        }

        debug!("force sync of unit {} from owner {}", unit.id, unit.owner);

        let snapshot = UnitSnapshot::package(unit, now);
        let mut writer = WireWriter::new();
        MessageKind::UnitCheck.ser(&mut writer);
        writer.write_u8(1);
        writer.write_u32(now);
        snapshot.ser(&mut writer);
        transport.send(Recipient::Game, writer.to_bytes());
    }

    /// Process an incoming unit-check payload (kind byte already consumed).
    pub fn receive(
        &mut self,
        reader: &mut WireReader,
        world: &mut dyn World,
    ) -> Result<(), SyncError> {
        let count = reader.read_u8()?;
        let ref_time = reader.read_u32()?;

        for _ in 0..count {
            let incoming = UnitSnapshot::de(reader, ref_time)?;

            if incoming.owner as usize >= MAX_PLAYERS {
                return Err(SyncError::OwnerOutOfRange {
                    message: "unit check",
                    owner: incoming.owner,
                });
            }

            self.merge(world, incoming);
        }

        Ok(())
    }

    fn merge(&mut self, world: &mut dyn World, incoming: UnitSnapshot) {
        let owner = incoming.owner;
        let id = incoming.id;

        let merged = {
            let Some(unit) = world.unit_mut(owner, id) else {
                // Soft failure: the unit may not have replicated here yet.
                debug!(
                    "received checking info for an unknown (as yet) unit, owner {} id {}",
                    owner, id
                );
                return;
            };

            let Some(baseline) = unit.baseline.clone() else {
                debug!("got a unit {} check, but have no baseline to diff against", id);
                return;
            };
            if baseline.game_time != incoming.game_time {
                // Stale baseline: we didn't sample the same unit at the
                // sender's reference time, so the delta would be wrong.
                debug!(
                    "got a unit {} check for time {}, but our baseline is from {}",
                    id, incoming.game_time, baseline.game_time
                );
                return;
            }

            // The baseline is consumed by the merge, so a replayed batch is
            // rejected by the guard above instead of double-applying.
            unit.baseline = None;

            let dx = incoming.pos_x - baseline.pos_x;
            let dy = incoming.pos_y - baseline.pos_y;
            unit.pos_x += dx;
            unit.pos_y += dy;
            unit.soft_x += dx;
            unit.soft_y += dy;
            unit.set_heading(unit.heading + (incoming.heading - baseline.heading));

            let health =
                i64::from(unit.health) + i64::from(incoming.health) - i64::from(baseline.health);
            unit.health = health.clamp(0, i64::from(u32::MAX)) as u32;
            unit.experience += incoming.experience - baseline.experience;

            if dx != 0.0 || dy != 0.0 {
                debug!(
                    "unit {} out of sync, position corrected by ({}, {})",
                    id, dx, dy
                );
            }

            Merged {
                moved: dx != 0.0 || dy != 0.0,
                airborne: unit.airborne,
                pos_x: unit.pos_x,
                pos_y: unit.pos_y,
                baseline,
            }
        };

        // Snap a grounded unit back onto the terrain at its corrected
        // horizontal position.
        if merged.moved && !merged.airborne {
            let height = world.terrain_height(merged.pos_x, merged.pos_y);
            if let Some(unit) = world.unit_mut(owner, id) {
                unit.pos_z = height;
            }
        }

        // Command correction: overwrite, not delta, and only when the kind
        // or payload actually drifted. Doesn't cover every command kind, but
        // at least won't actively break anything.
        match incoming.command {
            command @ (Command::Move { .. } | Command::Attack { .. }) => {
                if command != merged.baseline.command {
                    debug!(
                        "unit {} out of sync, re-issuing command {:?} (was {:?})",
                        id, command, merged.baseline.command
                    );
                    let _mute = self.mute.engage();
                    world.issue_command(owner, id, command);
                }
            }
            Command::Idle | Command::Guard => {
                if !incoming.command.same_kind(&merged.baseline.command) {
                    debug!(
                        "unit {} out of sync, stopping (command was {:?})",
                        id, merged.baseline.command
                    );
                    let _mute = self.mute.engage();
                    world.stop_unit(owner, id);
                }
            }
            // Unknown kind: leave the local command alone.
            Command::Other(_) => {}
        }

        // Applied after the command side effect, which may reset modifiers.
        if incoming.secondary_order != merged.baseline.secondary_order {
            if let Some(unit) = world.unit_mut(owner, id) {
                unit.secondary_order = incoming.secondary_order;
            }
        }
    }
}

struct Merged {
    moved: bool,
    airborne: bool,
    pos_x: f32,
    pos_y: f32,
    baseline: UnitSnapshot,
}
