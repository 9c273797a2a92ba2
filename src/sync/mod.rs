pub mod config;
pub mod error;
pub mod manager;
pub mod mute;
pub mod resource_channel;
pub mod sampler;
pub mod score_channel;
pub mod snapshot;
pub mod structure_channel;
pub mod timer;
pub mod unit_channel;
