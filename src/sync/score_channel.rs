use crate::{
    constants::MAX_PLAYERS,
    session::Session,
    sync::{config::SyncConfig, timer::ChannelTimer},
    types::{GameTime, PeerId},
};

/// Periodic score fold-and-broadcast. For every owner under local authority
/// (the host also covers computer-controlled owners), pending score/kill
/// deltas are folded into the running totals, zeroed, and the updated record
/// is pushed through the statistics-distribution interface. Nothing travels
/// on this crate's own wire; distribution is external.
pub struct ScoreChannel {
    timer: ChannelTimer,
}

impl ScoreChannel {
    pub fn new(config: &SyncConfig) -> Self {
        Self {
            timer: ChannelTimer::new(config.score_interval),
        }
    }

    pub fn send_check(&mut self, now: GameTime, session: &mut dyn Session) {
        if !self.timer.ready(now) {
            return;
        }

        // Not while still in pre-game configuration screens.
        if session.in_lobby() {
            return;
        }

        for owner in 0..MAX_PLAYERS as PeerId {
            if !session.is_responsible(owner) {
                continue;
            }

            let mut record = session.score(owner);
            record.fold_pending();
            session.broadcast_score(owner, record);
        }
    }
}
