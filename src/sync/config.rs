use crate::constants::{
    AVERAGE_PING_INTERVAL, MAX_BYTES_PER_SEC, MAX_MODULE_CAPACITY, OWNER_PICK_RETRIES,
    PING_INTERVAL, RESOURCE_CHECK_INTERVAL, SCORE_CHECK_INTERVAL, SNAPSHOT_COOLDOWN,
    STRUCTURE_CHECK_INTERVAL, UNIT_BATCH_SIZE, UNIT_CHECK_INTERVAL,
};
use crate::types::GameTime;

/// Knobs for the sync cadence and its safety bounds. Intervals are logical
/// milliseconds; defaults derive from the locked multiplayer tick.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub unit_interval: GameTime,
    pub structure_interval: GameTime,
    pub resource_interval: GameTime,
    pub score_interval: GameTime,
    pub ping_interval: GameTime,
    pub average_ping_interval: GameTime,
    /// Skip re-sending a unit snapshotted within this window.
    pub snapshot_cooldown: GameTime,
    /// Units sampled per unit-check batch.
    pub unit_batch_size: usize,
    /// Random-owner retry budget for the unit pick.
    pub owner_pick_retries: usize,
    /// Recent-outbound-bytes ceiling for optional channels.
    pub bandwidth_ceiling: usize,
    /// Reject received capacities above this rather than converging.
    pub max_module_capacity: u8,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            unit_interval: UNIT_CHECK_INTERVAL,
            structure_interval: STRUCTURE_CHECK_INTERVAL,
            resource_interval: RESOURCE_CHECK_INTERVAL,
            score_interval: SCORE_CHECK_INTERVAL,
            ping_interval: PING_INTERVAL,
            average_ping_interval: AVERAGE_PING_INTERVAL,
            snapshot_cooldown: SNAPSHOT_COOLDOWN,
            unit_batch_size: UNIT_BATCH_SIZE,
            owner_pick_retries: OWNER_PICK_RETRIES,
            bandwidth_ceiling: MAX_BYTES_PER_SEC,
            max_module_capacity: MAX_MODULE_CAPACITY,
        }
    }
}
