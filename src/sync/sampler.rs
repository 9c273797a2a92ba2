use crate::{
    constants::MAX_PLAYERS,
    session::Session,
    types::{EntityId, PeerId},
    world::world_type::World,
};

/// Uniform single-unit pick. Chooses a populated owner at random within a
/// bounded retry budget, then reservoir-samples one unit from that owner's
/// population in a single pass.
///
/// The RNG is owned and seedable: every peer seeds it identically so all
/// peers sample the same units at the same logical time, which is what lets
/// a receiver hold a baseline matching the sender's reference time.
pub struct UnitPicker {
    rng: fastrand::Rng,
    retries: usize,
}

impl UnitPicker {
    pub fn new(seed: u64, retries: usize) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            retries,
        }
    }

    /// Pick a unit, or `None` when (with high probability) no owner has any.
    pub fn pick(&mut self, world: &dyn World) -> Option<(PeerId, EntityId)> {
        let mut population = Vec::new();
        let mut owner = None;

        for _ in 0..self.retries {
            let candidate = self.rng.usize(..MAX_PLAYERS) as PeerId;
            let ids = world.unit_ids(candidate);
            if !ids.is_empty() {
                owner = Some(candidate);
                population = ids;
                break;
            }
        }
        let owner = owner?;

        // Reservoir sampling of size 1: at step i (1-indexed), replace the
        // candidate with probability 1/i. Uniform without knowing the
        // population size in advance.
        let mut chosen = None;
        for (step, id) in population.into_iter().enumerate() {
            if self.rng.usize(..=step) == 0 {
                chosen = Some(id);
            }
        }

        chosen.map(|id| (owner, id))
    }
}

/// Persistent round-robin cursor over all authoritative owners' structures.
/// Advances one structure per call; walks to the next owner at list end, and
/// gives up after one full pass over the owners when nothing is eligible.
#[derive(Debug, Clone, Default)]
pub struct StructureCursor {
    owner: PeerId,
    index: usize,
}

impl StructureCursor {
    pub fn new() -> Self {
        Self::default()
    }

    fn advance_owner(&mut self) {
        self.owner = (self.owner + 1) % MAX_PLAYERS as PeerId;
        self.index = 0;
    }

    pub fn next(
        &mut self,
        world: &dyn World,
        session: &dyn Session,
    ) -> Option<(PeerId, EntityId)> {
        let mut tries = 0;

        loop {
            if tries > MAX_PLAYERS {
                return None;
            }

            // Don't send structures that are not our problem.
            if !session.is_responsible(self.owner) {
                self.advance_owner();
                tries += 1;
                continue;
            }

            let ids = world.structure_ids(self.owner);
            if let Some(id) = ids.get(self.index).copied() {
                self.index += 1;
                return Some((self.owner, id));
            }

            // Last structure, or no structures at all for this owner.
            self.advance_owner();
            tries += 1;
        }
    }
}
