use log::debug;

use crate::{
    connection::transport::{MessageKind, Recipient, Transport},
    constants::MAX_PLAYERS,
    session::Session,
    sync::{config::SyncConfig, error::SyncError, timer::ChannelTimer},
    types::GameTime,
    wire::{Wire, WireReader, WireWriter},
    world::world_type::World,
};

/// Authoritative scalar-resource broadcast. No delta logic: resource totals
/// are independently authoritative per peer, so the receiver overwrites,
/// last writer wins.
pub struct ResourceChannel {
    timer: ChannelTimer,
}

impl ResourceChannel {
    pub fn new(config: &SyncConfig) -> Self {
        Self {
            timer: ChannelTimer::new(config.resource_interval),
        }
    }

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

        let owner = session.local_peer();
        let amount = world.resource(owner);

        let mut writer = WireWriter::new();
        MessageKind::ResourceCheck.ser(&mut writer);
        writer.write_u8(owner);
        writer.write_u32(amount);
        transport.send(Recipient::Game, writer.to_bytes());
    }

    /// Process an incoming resource-check payload (kind byte already
    /// consumed).
    pub fn receive(
        &mut self,
        reader: &mut WireReader,
        world: &mut dyn World,
    ) -> Result<(), SyncError> {
        let owner = reader.read_u8()?;
        let amount = reader.read_u32()?;

        if owner as usize >= MAX_PLAYERS {
            return Err(SyncError::OwnerOutOfRange {
                message: "resource check",
                owner,
            });
        }

        let ours = world.resource(owner);
        if ours != amount {
            debug!(
                "adjusting resources for owner {} from {} to {}",
                owner, ours, amount
            );
            world.set_resource(owner, amount);
        }

        Ok(())
    }
}
