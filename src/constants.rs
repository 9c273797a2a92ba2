use crate::types::GameTime;

/// Maximum number of peers / entity owners in a session.
pub const MAX_PLAYERS: usize = 8;

/// Multiplayer games run a locked simulation tick; all cadences derive
/// from it so peers agree on when checks may fire.
pub const GAME_TICK_MILLIS: GameTime = 45;

/// How often (ms) to send a unit check.
pub const UNIT_CHECK_INTERVAL: GameTime = GAME_TICK_MILLIS * 7;

/// How often (ms) to send a structure check.
pub const STRUCTURE_CHECK_INTERVAL: GameTime = GAME_TICK_MILLIS * 10;

/// How often (ms) to broadcast resource levels.
pub const RESOURCE_CHECK_INTERVAL: GameTime = GAME_TICK_MILLIS * 14;

/// How often (ms) to fold and broadcast scores.
pub const SCORE_CHECK_INTERVAL: GameTime = GAME_TICK_MILLIS * 2400;

/// How often (ms) to ping the other peers.
pub const PING_INTERVAL: GameTime = GAME_TICK_MILLIS * 600;

/// How often (ms) the host republishes the average round-trip for joiners.
pub const AVERAGE_PING_INTERVAL: GameTime = GAME_TICK_MILLIS * 1000;

/// Ceiling on recent outbound bytes; optional channels are gated above it.
pub const MAX_BYTES_PER_SEC: usize = 10240;

/// Units sampled per unit-check batch.
pub const UNIT_BATCH_SIZE: usize = 12;

/// A unit snapshotted more recently than this (ms) is not re-sent.
pub const SNAPSHOT_COOLDOWN: GameTime = 5000;

/// Random-owner retry budget when picking a unit to sample.
pub const OWNER_PICK_RETRIES: usize = 200;

/// Worst-case round-trip sentinel (ms) assigned to a human peer that failed
/// to answer the previous ping.
pub const PING_LIMIT: u32 = 4000;

/// Upper bound on replicated capacity-module count. A received capacity
/// above this is rejected rather than converged toward.
pub const MAX_MODULE_CAPACITY: u8 = 4;
