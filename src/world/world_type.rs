use crate::{
    types::{EntityId, PeerId, TypeRef},
    world::{
        structure::{Structure, TilePos},
        unit::{Command, Unit},
    },
};

/// Query/mutation interface onto the live local replica. The simulation owns
/// entity storage and lifecycles; this is the narrow seam the sync protocol
/// reads and corrects through.
///
/// Mutating operations that correspond to real simulation actions
/// (`build_structure`, `upgrade_structure`, `issue_command`, `stop_unit`)
/// are expected to perform their usual side effects, including updating the
/// affected entity's own fields.
pub trait World {
    // Units

    fn unit(&self, owner: PeerId, id: EntityId) -> Option<&Unit>;
    fn unit_mut(&mut self, owner: PeerId, id: EntityId) -> Option<&mut Unit>;
    /// Ids of the owner's live units. Ordering is unspecified but must be
    /// stable within a tick and identical across peers with identical worlds.
    fn unit_ids(&self, owner: PeerId) -> Vec<EntityId>;

    /// Issue a high-level command; replaces the unit's current command.
    fn issue_command(&mut self, owner: PeerId, id: EntityId, command: Command);
    /// Stop the unit, leaving it idle.
    fn stop_unit(&mut self, owner: PeerId, id: EntityId);

    // Structures

    fn structure(&self, owner: PeerId, id: EntityId) -> Option<&Structure>;
    fn structure_mut(&mut self, owner: PeerId, id: EntityId) -> Option<&mut Structure>;
    fn structure_ids(&self, owner: PeerId) -> Vec<EntityId>;
    /// Whichever structure occupies the tile at (x, y), if any.
    fn structure_at(&self, x: u16, y: u16) -> Option<(PeerId, EntityId)>;

    /// Whether the type catalog knows this reference at all.
    fn structure_type_exists(&self, type_ref: TypeRef) -> bool;
    /// Whether the type carries an incremental capacity level.
    fn type_has_capacity(&self, type_ref: TypeRef) -> bool;
    /// Whether a structure of `occupying` type may be torn down and rebuilt
    /// as `incoming` to repair a divergent build.
    fn compatible_upgrade(&self, occupying: TypeRef, incoming: TypeRef) -> bool;

    /// Construct a new structure; returns the id the simulation assigned it,
    /// or `None` if construction failed.
    fn build_structure(
        &mut self,
        owner: PeerId,
        type_ref: TypeRef,
        pos: TilePos,
        heading: f32,
    ) -> Option<EntityId>;
    fn demolish_structure(&mut self, owner: PeerId, id: EntityId);
    /// Apply one incremental capacity-upgrade step (a real construction
    /// action, not a field write).
    fn upgrade_structure(&mut self, owner: PeerId, id: EntityId);
    /// Rebind a structure to the id the authoritative peer knows it by.
    fn reassign_structure_id(&mut self, owner: PeerId, id: EntityId, new_id: EntityId);

    // Terrain & resources

    fn terrain_height(&self, x: f32, y: f32) -> f32;
    fn resource(&self, owner: PeerId) -> u32;
    fn set_resource(&mut self, owner: PeerId, amount: u32);
}
