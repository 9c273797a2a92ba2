use crate::types::PeerId;

/// A peer's running score totals plus the deltas accumulated since the last
/// broadcast. The authoritative peer folds the pending fields into the
/// totals, zeroes them, and ships the record through
/// [`Session::broadcast_score`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreRecord {
    pub total_score: u32,
    pub total_kills: u32,
    pub recent_score: u32,
    pub recent_kills: u32,
    pub pending_score: u32,
    pub pending_kills: u32,
}

impl ScoreRecord {
    /// Fold pending deltas into the running totals and zero them.
    pub fn fold_pending(&mut self) {
        self.recent_kills += self.pending_kills;
        self.total_kills += self.pending_kills;
        self.recent_score += self.pending_score;
        self.total_score += self.pending_score;
        self.pending_kills = 0;
        self.pending_score = 0;
    }
}

/// Session and authority state, read from the surrounding multiplayer layer.
/// Authority is never negotiated here: exactly one peer answers `true` to
/// `is_responsible` for a given owner at any time.
pub trait Session {
    /// The local peer's id.
    fn local_peer(&self) -> PeerId;

    /// Whether the local peer hosts the session.
    fn is_host(&self) -> bool;

    /// Whether the peer is driven by a human (as opposed to the computer).
    fn is_human(&self, peer: PeerId) -> bool;

    /// Whether the local peer holds broadcast authority for this owner's
    /// entities (typically: the owner's controlling human peer, or the host
    /// for computer-controlled owners).
    fn is_responsible(&self, owner: PeerId) -> bool;

    /// Whether the peer is still mid join-handshake.
    fn join_in_progress(&self, peer: PeerId) -> bool;

    /// Whether the session is still in pre-game configuration screens.
    fn in_lobby(&self) -> bool;

    /// Current score record for the owner, pending deltas included.
    fn score(&self, owner: PeerId) -> ScoreRecord;

    /// Broadcast the owner's updated score record through the external
    /// statistics-distribution interface.
    fn broadcast_score(&mut self, owner: PeerId, record: ScoreRecord);

    /// Publish the average round-trip across human peers for display to
    /// peers still joining. Host only.
    fn publish_average_ping(&mut self, millis: u32);
}
