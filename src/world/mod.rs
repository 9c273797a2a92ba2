pub mod structure;
pub mod unit;
pub mod world_type;
