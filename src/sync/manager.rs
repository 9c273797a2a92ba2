use log::error;

use crate::{
    connection::{
        bandwidth_monitor::BandwidthMonitor,
        ping_manager::PingManager,
        transport::{MessageKind, Transport},
    },
    constants::MAX_PLAYERS,
    session::Session,
    sync::{
        config::SyncConfig, error::SyncError, resource_channel::ResourceChannel,
        score_channel::ScoreChannel, structure_channel::StructureChannel,
        unit_channel::UnitChannel,
    },
    types::{GameTime, PeerId},
    wire::{Wire, WireReader},
    world::world_type::World,
};

/// Sent/unsent gate tallies per optional channel, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncCounters {
    pub sent_structure_check: u32,
    pub unsent_structure_check: u32,
    pub sent_resource_check: u32,
    pub unsent_resource_check: u32,
    pub sent_score_check: u32,
    pub unsent_score_check: u32,
    pub sent_ping: u32,
    pub unsent_ping: u32,
}

/// Top-level cadence driver. Invoked once per simulation tick; decides which
/// channels run based on their own timers and the bandwidth monitor, and
/// dispatches incoming payloads to the right channel.
pub struct SyncManager {
    bandwidth: BandwidthMonitor,
    pub units: UnitChannel,
    pub structures: StructureChannel,
    pub resources: ResourceChannel,
    pub scores: ScoreChannel,
    pub pings: PingManager,
    pub counters: SyncCounters,
}

impl SyncManager {
    /// `seed` primes the unit pick stream and must be identical on every
    /// peer in the session.
    pub fn new(config: &SyncConfig, seed: u64) -> Self {
        Self {
            bandwidth: BandwidthMonitor::new(config.bandwidth_ceiling),
            units: UnitChannel::new(config, seed),
            structures: StructureChannel::new(config),
            resources: ResourceChannel::new(config),
            scores: ScoreChannel::new(config),
            pings: PingManager::new(config.ping_interval, config.average_ping_interval),
            counters: SyncCounters::default(),
        }
    }

    /// Per-tick send pass. Skipped entirely while any human peer is still
    /// mid join-handshake, to avoid racing a not-yet-initialized replica.
    ///
    /// The unit channel always attempts to send; structure, resource, score
    /// and ping checks are optional and gated on recent outbound traffic,
    /// re-evaluated per channel since each send consumes budget. Priority is
    /// units -> structures -> resources -> scores -> pings.
    pub fn send_check(
        &mut self,
        now: GameTime,
        world: &mut dyn World,
        session: &mut dyn Session,
        transport: &mut dyn Transport,
    ) {
        for peer in 0..MAX_PLAYERS as PeerId {
            if session.is_human(peer) && session.join_in_progress(peer) {
                return;
            }
        }

        self.units.send_check(now, world, session, transport);

        if self.bandwidth.may_send(transport) {
            self.structures.send_check(now, world, session, transport);
            self.counters.sent_structure_check += 1;
        } else {
            self.counters.unsent_structure_check += 1;
        }

        if self.bandwidth.may_send(transport) {
            self.resources.send_check(now, world, session, transport);
            self.counters.sent_resource_check += 1;
        } else {
            self.counters.unsent_resource_check += 1;
        }

        if self.bandwidth.may_send(transport) {
            self.scores.send_check(now, session);
            self.counters.sent_score_check += 1;
        } else {
            self.counters.unsent_score_check += 1;
        }

        if self.bandwidth.may_send(transport) {
            self.pings.send_check(now, session, transport);
            self.counters.sent_ping += 1;
        } else {
            self.counters.unsent_ping += 1;
        }
    }

    /// Dispatch one received payload to its channel. A returned error means
    /// that message was rejected; the caller's tick loop continues.
    pub fn receive(
        &mut self,
        now: GameTime,
        payload: &[u8],
        world: &mut dyn World,
        session: &dyn Session,
        transport: &mut dyn Transport,
    ) -> Result<(), SyncError> {
        let mut reader = WireReader::new(payload);

        let result = match MessageKind::de(&mut reader)? {
            MessageKind::UnitCheck => self.units.receive(&mut reader, world),
            MessageKind::StructureCheck => self.structures.receive(&mut reader, world),
            MessageKind::ResourceCheck => self.resources.receive(&mut reader, world),
            MessageKind::Ping => self.pings.receive(&mut reader, now, session, transport),
        };

        if let Err(rejection) = &result {
            error!("sync message rejected: {}", rejection);
        }
        result
    }
}
