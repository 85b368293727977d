//! Host world contract.
//!
//! The search service never owns world data. It consumes the host's
//! world through this narrow read-side interface: a residency check, an
//! asynchronous load request, and a block read that is only valid while
//! the backing region is resident.

use futures::future::BoxFuture;

use super::block::BlockId;
use super::position::{Location, RegionPos, WorldBounds, WorldId};

/// Ways a region load can complete unsuccessfully.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegionLoadError {
    /// Transient failure (I/O error, corrupt payload). Costs the current
    /// attempt, not the whole search.
    #[error("region load failed: {0}")]
    Failed(String),

    /// The store can never supply this region. Aborts the search.
    #[error("region permanently unavailable")]
    Unavailable,
}

/// Read-side contract the host world exposes to the search service.
///
/// `block_at` is only meaningful while the backing region is resident,
/// and must only be called from the simulation context. `request_region_load`
/// may be called from the simulation context at any time; the returned
/// future completes when the host's loader (typically a worker pool) has
/// populated its cache, and awaiting it never blocks the caller's thread.
pub trait WorldAccessor: Send + Sync {
    /// Extent of a world, or `None` if the accessor does not know it.
    fn bounds(&self, world: WorldId) -> Option<WorldBounds>;

    /// Whether the region is resident and readable right now.
    fn is_region_resident(&self, world: WorldId, region: RegionPos) -> bool;

    /// Ask the host to make a region resident.
    fn request_region_load(
        &self,
        world: WorldId,
        region: RegionPos,
    ) -> BoxFuture<'static, Result<(), RegionLoadError>>;

    /// Read the block at a location. `None` when the region is not
    /// resident or the location is outside the world.
    fn block_at(&self, location: Location) -> Option<BlockId>;
}
