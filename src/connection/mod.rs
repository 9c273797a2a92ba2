pub mod bandwidth_monitor;
pub mod ping_manager;
pub mod transport;
