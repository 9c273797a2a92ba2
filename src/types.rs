/// Index of a peer / entity owner. Exactly one peer holds broadcast
/// authority per owner at any time.
pub type PeerId = u8;

/// World-unique entity identifier, assigned by the simulation.
pub type EntityId = u32;

/// Reference into the external structure-type catalog.
pub type TypeRef = u32;

/// Logical simulation time in milliseconds. Monotonically increasing under
/// normal operation, but may be corrected backward by a desync repair on the
/// clock itself; timers must tolerate that.
pub type GameTime = u32;
