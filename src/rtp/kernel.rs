//! Kernel strategy contract.
//!
//! A kernel proposes candidate columns; it never touches world data. The
//! vertical side of the search - walking a column for a standable layer  - 
//! happens later, on the simulation context, once the backing region is
//! resident.

use rand::rngs::StdRng;

use crate::world::{BlockPos, BlockRegistry, ColumnPos, Location, WorldAccessor, WorldBounds};

use super::envelope::SearchEnvelope;
use super::safety::{SafetyValidator, StandingSnapshot};

/// How the vertical scan walks a candidate column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalScan {
    /// From the world ceiling down, accept the first standable layer.
    TopDown,
    /// From the world floor up, accept the first standable layer.
    BottomUp,
    /// Test exactly one layer.
    FixedY(i32),
    /// Only the layer above the topmost exposed surface block. A column
    /// whose surface fails validation yields no candidate.
    SurfaceOnly,
}

/// An (x, z) column proposed by a kernel, plus how to scan it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateColumn {
    pub column: ColumnPos,
    pub scan: VerticalScan,
}

/// A live anchor the around-player kernels center on. Re-read by the
/// orchestrator before every attempt, so a moving player shifts the
/// annulus between attempts.
pub trait ReferencePoint: Send + Sync {
    fn current(&self) -> Location;
}

/// A fixed location is its own reference point.
impl ReferencePoint for Location {
    fn current(&self) -> Location {
        *self
    }
}

/// A pluggable sampling strategy.
///
/// Kernels are stateless: any per-attempt state arrives through the
/// arguments and is discarded after the call, so one kernel instance can
/// serve many interleaved searches.
pub trait Kernel: Send + Sync + std::fmt::Debug {
    /// Catalog name. Unique, compared case-insensitively.
    fn name(&self) -> &str;

    /// Propose one candidate column, or `None` when this attempt cannot
    /// produce one (e.g. the draw landed outside the world border).
    ///
    /// `anchor` is the freshly-read reference point for this attempt;
    /// origin-centered kernels ignore it.
    fn sample(
        &self,
        envelope: &SearchEnvelope,
        anchor: Location,
        bounds: WorldBounds,
        rng: &mut StdRng,
    ) -> Option<CandidateColumn>;
}

/// Walk a candidate column per its scan policy and return the first
/// standing position that passes the validator.
///
/// Runs on the simulation context with the backing region resident.
/// Absorbs every anomaly as "no candidate" - unreadable cells simply fail
/// validation.
pub(crate) fn resolve_column(
    accessor: &dyn WorldAccessor,
    registry: &BlockRegistry,
    validator: &SafetyValidator,
    world: crate::world::WorldId,
    bounds: WorldBounds,
    candidate: &CandidateColumn,
) -> Option<BlockPos> {
    let column = candidate.column;
    if !bounds.contains_column(column) {
        return None;
    }

    // Feet can occupy [floor + 1, ceiling - 2]: footing below, head above.
    let lowest_feet = bounds.floor + 1;
    let highest_feet = bounds.ceiling - 2;
    if lowest_feet > highest_feet {
        return None;
    }

    let passes = |feet_y: i32| -> bool {
        let snapshot = StandingSnapshot::capture(
            accessor,
            registry,
            Location::new(world, column.at(feet_y)),
        );
        validator.is_safe(&snapshot)
    };

    match candidate.scan {
        VerticalScan::TopDown => (lowest_feet..=highest_feet).rev().find(|&y| passes(y)),
        VerticalScan::BottomUp => (lowest_feet..=highest_feet).find(|&y| passes(y)),
        VerticalScan::FixedY(y) => (y >= lowest_feet && y <= highest_feet && passes(y)).then_some(y),
        VerticalScan::SurfaceOnly => {
            let surface = surface_of(accessor, registry, world, bounds, column)?;
            let feet = surface + 1;
            (feet >= lowest_feet && feet <= highest_feet && passes(feet)).then_some(feet)
        }
    }
    .map(|feet_y| column.at(feet_y))
}

/// Height of the topmost exposed surface block of a column: the first
/// non-passable block met scanning down from the ceiling. An unreadable
/// cell ends the scan with no surface.
fn surface_of(
    accessor: &dyn WorldAccessor,
    registry: &BlockRegistry,
    world: crate::world::WorldId,
    bounds: WorldBounds,
    column: ColumnPos,
) -> Option<i32> {
    for y in (bounds.floor..bounds.ceiling).rev() {
        let block = accessor.block_at(Location::new(world, column.at(y)))?;
        let properties = registry.get_properties(block)?;
        if !properties.passable() {
            return Some(y);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{BlockId, MemoryWorld, RegionPos, WorldId};
    use rustc_hash::FxHashSet;

    fn fixture() -> (MemoryWorld, WorldId, BlockRegistry, SafetyValidator) {
        let world = MemoryWorld::new();
        let id = WorldId(1);
        // Solid floor at y=20, an overhang slab at y=80 over x >= 10.
        world.add_world(id, WorldBounds::new(0, 128), move |pos| {
            if pos.y <= 20 || (pos.y == 80 && pos.x >= 10) {
                BlockId::STONE
            } else {
                BlockId::AIR
            }
        });
        world.mark_region_resident(id, RegionPos { x: 0, z: 0 });
        let registry = BlockRegistry::with_defaults();
        let validator = SafetyValidator::new(FxHashSet::default());
        (world, id, registry, validator)
    }

    fn resolve(
        world: &MemoryWorld,
        id: WorldId,
        registry: &BlockRegistry,
        validator: &SafetyValidator,
        column: ColumnPos,
        scan: VerticalScan,
    ) -> Option<BlockPos> {
        resolve_column(
            world,
            registry,
            validator,
            id,
            WorldBounds::new(0, 128),
            &CandidateColumn { column, scan },
        )
    }

    #[test]
    fn test_top_down_finds_highest_layer() {
        let (world, id, registry, validator) = fixture();
        // Covered column: top-down lands on top of the slab, not on the
        // floor beneath it.
        let pos = resolve(
            &world,
            id,
            &registry,
            &validator,
            ColumnPos::new(12, 3),
            VerticalScan::TopDown,
        )
        .expect("column has standable layers");
        assert_eq!(pos.y, 81);
    }

    #[test]
    fn test_bottom_up_finds_lowest_layer() {
        let (world, id, registry, validator) = fixture();
        let pos = resolve(
            &world,
            id,
            &registry,
            &validator,
            ColumnPos::new(12, 3),
            VerticalScan::BottomUp,
        )
        .expect("column has standable layers");
        assert_eq!(pos.y, 21);
    }

    #[test]
    fn test_fixed_y() {
        let (world, id, registry, validator) = fixture();
        let pos = resolve(
            &world,
            id,
            &registry,
            &validator,
            ColumnPos::new(2, 2),
            VerticalScan::FixedY(21),
        );
        assert_eq!(pos, Some(BlockPos::new(2, 21, 2)));

        // Mid-air layer fails.
        let none = resolve(
            &world,
            id,
            &registry,
            &validator,
            ColumnPos::new(2, 2),
            VerticalScan::FixedY(50),
        );
        assert_eq!(none, None);
    }

    #[test]
    fn test_surface_never_lands_under_overhang() {
        let (world, id, registry, validator) = fixture();

        // Covered column: the surface is the overhang top.
        let covered = resolve(
            &world,
            id,
            &registry,
            &validator,
            ColumnPos::new(15, 0),
            VerticalScan::SurfaceOnly,
        )
        .expect("overhang top is standable");
        assert_eq!(covered.y, 81);

        // Open column: the surface is the floor.
        let open = resolve(
            &world,
            id,
            &registry,
            &validator,
            ColumnPos::new(3, 0),
            VerticalScan::SurfaceOnly,
        )
        .expect("floor is standable");
        assert_eq!(open.y, 21);
    }

    #[test]
    fn test_surface_yields_nothing_when_blocked() {
        let (world, id, registry, validator) = fixture();
        // Pool of water sitting on the overhang: the exposed surface is
        // the water, which is not standable.
        world.set_block(
            Location::new(id, BlockPos::new(15, 81, 5)),
            BlockId::WATER,
        );
        let blocked = resolve(
            &world,
            id,
            &registry,
            &validator,
            ColumnPos::new(15, 5),
            VerticalScan::SurfaceOnly,
        );
        // Surface kernel must not fall back to lower layers.
        assert_eq!(blocked, None);
    }

    #[test]
    fn test_unresident_column_resolves_to_nothing() {
        let (world, id, registry, validator) = fixture();
        let none = resolve(
            &world,
            id,
            &registry,
            &validator,
            ColumnPos::new(200, 200),
            VerticalScan::TopDown,
        );
        assert_eq!(none, None);
    }
}
