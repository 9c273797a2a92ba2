use log::debug;

use crate::{
    connection::transport::{MessageKind, Recipient, Transport},
    constants::{MAX_PLAYERS, PING_LIMIT},
    session::Session,
    sync::{error::SyncError, timer::ChannelTimer},
    types::{GameTime, PeerId},
    wire::{Wire, WireReader, WireWriter},
};

/// Per-peer round-trip tracking.
#[derive(Debug, Clone, Copy, Default)]
pub struct PingState {
    /// Last round-trip estimate in milliseconds.
    pub round_trip: u32,
    /// When the last outbound ping was sent; zero when none is outstanding.
    sent_at: GameTime,
}

/// Symmetric ping/pong exchange producing per-peer round-trip estimates and
/// a host-computed rolling average for peers still joining.
pub struct PingManager {
    timer: ChannelTimer,
    average_timer: ChannelTimer,
    states: [PingState; MAX_PLAYERS],
}

impl PingManager {
    pub fn new(interval: GameTime, average_interval: GameTime) -> Self {
        Self {
            timer: ChannelTimer::new(interval),
            average_timer: ChannelTimer::new(average_interval),
            states: [PingState::default(); MAX_PLAYERS],
        }
    }

    pub fn round_trip(&self, peer: PeerId) -> u32 {
        self.states[peer as usize].round_trip
    }

    /// Mean round-trip across human peers.
    pub fn average(&self, session: &dyn Session) -> u32 {
        let mut total = 0u32;
        let mut count = 0u32;
        for peer in 0..MAX_PLAYERS as PeerId {
            if session.is_human(peer) {
                total += self.states[peer as usize].round_trip;
                count += 1;
            }
        }
        total / count.max(1)
    }

    /// Paced ping broadcast. Before each new ping, peers that never answered
    /// the previous one are timed out: humans get the worst-case sentinel,
    /// computer peers reset to zero (they are never truly absent).
    pub fn send_check(
        &mut self,
        now: GameTime,
        session: &mut dyn Session,
        transport: &mut dyn Transport,
    ) {
        if !self.timer.ready(now) {
            return;
        }

        // If host, also update the average ping stat for joiners.
        if session.is_host() && self.average_timer.ready(now) {
            let average = self.average(session);
            session.publish_average_ping(average);
        }

        let local = session.local_peer();
        for peer in 0..MAX_PLAYERS as PeerId {
            if peer == local {
                continue;
            }
            let state = &mut self.states[peer as usize];
            if state.sent_at != 0 {
                state.round_trip = if session.is_human(peer) { PING_LIMIT } else { 0 };
            }
        }

        let mut writer = WireWriter::new();
        MessageKind::Ping.ser(&mut writer);
        writer.write_u8(local);
        writer.write_bool(true);
        transport.send(Recipient::Broadcast, writer.to_bytes());

        // Note when we sent the ping.
        for state in self.states.iter_mut() {
            state.sent_at = now;
        }
    }

    /// Process an incoming ping payload (kind byte already consumed). New
    /// pings are answered directly; responses close out the outstanding
    /// marker and update the estimate.
    pub fn receive(
        &mut self,
        reader: &mut WireReader,
        now: GameTime,
        session: &dyn Session,
        transport: &mut dyn Transport,
    ) -> Result<(), SyncError> {
        let sender = reader.read_u8()?;
        let is_new = reader.read_bool()?;

        if sender as usize >= MAX_PLAYERS {
            return Err(SyncError::PeerOutOfRange { peer: sender });
        }

        if is_new {
            let mut writer = WireWriter::new();
            MessageKind::Ping.ser(&mut writer);
            writer.write_u8(session.local_peer());
            writer.write_bool(false);
            transport.send(Recipient::Peer(sender), writer.to_bytes());
        } else {
            let state = &mut self.states[sender as usize];
            state.round_trip = now.saturating_sub(state.sent_at) / 2;
            state.sent_at = 0;
            debug!(
                "peer {} round-trip estimate now {} ms",
                sender, state.round_trip
            );
        }

        Ok(())
    }
}
