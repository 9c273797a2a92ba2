//! # DriftSync
//! Drift-detection-and-correction protocol for a real-time simulation
//! replicated across independent peers over an unreliable link.
//!
//! Each peer runs its own copy of a shared world. Floating-point
//! non-determinism, dropped messages and late joiners make replicas diverge;
//! this crate periodically samples pieces of the authoritative peer's state,
//! ships compact snapshots to everyone else, and merges them into the local
//! replica with per-field reconciliation rules. It is explicitly best-effort:
//! divergence is tolerated and repaired, never fatal.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod connection;
mod constants;
mod session;
mod sync;
mod types;
mod wire;
mod world;

pub use connection::{
    bandwidth_monitor::BandwidthMonitor,
    ping_manager::{PingManager, PingState},
    transport::{MessageKind, Recipient, Transport},
};
pub use constants::{
    AVERAGE_PING_INTERVAL, GAME_TICK_MILLIS, MAX_BYTES_PER_SEC, MAX_MODULE_CAPACITY, MAX_PLAYERS,
    OWNER_PICK_RETRIES, PING_INTERVAL, PING_LIMIT, RESOURCE_CHECK_INTERVAL, SCORE_CHECK_INTERVAL,
    SNAPSHOT_COOLDOWN, STRUCTURE_CHECK_INTERVAL, UNIT_BATCH_SIZE, UNIT_CHECK_INTERVAL,
};
pub use session::{ScoreRecord, Session};
pub use sync::{
    config::SyncConfig,
    error::SyncError,
    manager::{SyncCounters, SyncManager},
    mute::{MuteGuard, OutboundMute},
    resource_channel::ResourceChannel,
    sampler::{StructureCursor, UnitPicker},
    score_channel::ScoreChannel,
    snapshot::UnitSnapshot,
    structure_channel::StructureChannel,
    timer::ChannelTimer,
    unit_channel::UnitChannel,
};
pub use types::{EntityId, GameTime, PeerId, TypeRef};
pub use wire::{error::WireError, Wire, WireReader, WireWriter};
pub use world::{
    structure::{BuildStatus, Structure, TilePos},
    unit::{normalize_heading, Command, Unit},
    world_type::World,
};
