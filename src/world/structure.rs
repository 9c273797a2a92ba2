use crate::types::{EntityId, PeerId, TypeRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    Planned,
    UnderConstruction,
    Built,
}

/// Tile-grid position of a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePos {
    pub x: u16,
    pub y: u16,
    pub z: u16,
}

/// A static entity. Far less latency-sensitive than units, so reconciliation
/// is authoritative overwrite rather than delta merge.
#[derive(Debug, Clone)]
pub struct Structure {
    pub owner: PeerId,
    pub id: EntityId,
    pub type_ref: TypeRef,
    pub status: BuildStatus,
    pub pos: TilePos,
    pub heading: f32,
    pub health: u32,
    /// Stacked upgrade-module count; `None` for types without incremental
    /// capacity.
    pub capacity: Option<u8>,
}

impl Structure {
    pub fn new(owner: PeerId, id: EntityId, type_ref: TypeRef, pos: TilePos) -> Self {
        Self {
            owner,
            id,
            type_ref,
            status: BuildStatus::UnderConstruction,
            pos,
            heading: 0.0,
            health: 100,
            capacity: None,
        }
    }

    pub fn is_built(&self) -> bool {
        self.status == BuildStatus::Built
    }
}
