//! Teleport safety predicate.
//!
//! A pure function of a small read-only snapshot: no I/O, no randomness,
//! no state. Anything the snapshot could not read is treated as unsafe.

use rustc_hash::FxHashSet;

use crate::world::{BlockId, BlockProperties, BlockRegistry, Location, WorldAccessor};

/// One block cell as the validator sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockView {
    /// Block data was readable and the material is registered.
    Known {
        id: BlockId,
        properties: BlockProperties,
    },
    /// Region not resident, position out of bounds, or material
    /// unregistered. Always unsafe.
    Unknown,
}

/// The cells a standing body touches: the footing block underfoot and the
/// two cells of headroom above it (feet and head).
#[derive(Debug, Clone, Copy)]
pub struct StandingSnapshot {
    pub footing: BlockView,
    pub feet: BlockView,
    pub head: BlockView,
}

impl StandingSnapshot {
    /// Read the snapshot for a body standing at `location` (the feet
    /// cell). Never panics; unreadable cells become `Unknown`.
    ///
    /// Must be called from the simulation context, like any other block
    /// read.
    pub fn capture(
        accessor: &dyn WorldAccessor,
        registry: &BlockRegistry,
        location: Location,
    ) -> Self {
        let view = |dy: i32| -> BlockView {
            let pos = location.pos.offset_y(dy);
            let block = accessor.block_at(Location::new(location.world, pos));
            match block {
                Some(id) => match registry.get_properties(id) {
                    Some(properties) => BlockView::Known {
                        id,
                        properties: *properties,
                    },
                    None => BlockView::Unknown,
                },
                None => BlockView::Unknown,
            }
        };

        Self {
            footing: view(-1),
            feet: view(0),
            head: view(1),
        }
    }
}

/// Decides whether a location is teleport-safe: solid footing, clear
/// headroom, nothing hazardous underfoot or at the body.
///
/// The hazard set is host policy, resolved from block names at service
/// build time.
pub struct SafetyValidator {
    hazards: FxHashSet<BlockId>,
}

impl SafetyValidator {
    pub fn new(hazards: FxHashSet<BlockId>) -> Self {
        Self { hazards }
    }

    /// Resolve hazard block names against a registry. Unknown names are a
    /// configuration error, not a silent no-op.
    pub fn from_names<'a>(
        registry: &BlockRegistry,
        names: impl IntoIterator<Item = &'a str>,
    ) -> anyhow::Result<Self> {
        let mut hazards = FxHashSet::default();
        for name in names {
            let id = registry
                .get_id(name)
                .ok_or_else(|| anyhow::anyhow!("hazard block '{}' is not registered", name))?;
            hazards.insert(id);
        }
        Ok(Self::new(hazards))
    }

    fn is_hazard(&self, id: BlockId) -> bool {
        self.hazards.contains(&id)
    }

    /// The safety predicate. Deterministic; returns `false` on any
    /// ambiguous or unloaded data.
    pub fn is_safe(&self, snapshot: &StandingSnapshot) -> bool {
        let BlockView::Known {
            id: footing_id,
            properties: footing,
        } = snapshot.footing
        else {
            return false;
        };
        if !footing.solid || self.is_hazard(footing_id) {
            return false;
        }

        for cell in [snapshot.feet, snapshot.head] {
            let BlockView::Known { id, properties } = cell else {
                return false;
            };
            if !properties.passable() || self.is_hazard(id) {
                return false;
            }
        }

        true
    }
}
