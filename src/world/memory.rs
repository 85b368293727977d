//! In-memory reference world.
//!
//! Backs the demo and the crate's tests. Block data comes from a pure
//! generator closure per world, with point overrides on top; regions are
//! made resident by a small worker pool so the asynchronous residency
//! contract is exercised the same way a disk- or network-backed store
//! would exercise it. Workers only touch the residency map, never live
//! block reads.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use dashmap::{DashMap, DashSet};
use futures::future::BoxFuture;
use tokio::sync::oneshot;

use super::accessor::{RegionLoadError, WorldAccessor};
use super::block::BlockId;
use super::position::{BlockPos, Location, RegionPos, WorldBounds, WorldId};

type Generator = dyn Fn(BlockPos) -> BlockId + Send + Sync;

struct WorldEntry {
    bounds: WorldBounds,
    generator: Box<Generator>,
    resident: DashSet<RegionPos>,
    overrides: DashMap<BlockPos, BlockId>,
    /// Scripted load faults. `Failed` entries fire once; `Unavailable`
    /// entries are permanent.
    faults: DashMap<RegionPos, RegionLoadError>,
}

struct LoadJob {
    entry: Arc<WorldEntry>,
    region: RegionPos,
    delay: Duration,
    done: oneshot::Sender<Result<(), RegionLoadError>>,
}

/// Worker pool that services load requests off the simulation context.
struct LoaderPool {
    tx: Option<crossbeam_channel::Sender<LoadJob>>,
    workers: Vec<JoinHandle<()>>,
}

impl LoaderPool {
    fn new(worker_count: usize) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded::<LoadJob>();
        let workers = (0..worker_count)
            .map(|index| {
                let rx = rx.clone();
                thread::Builder::new()
                    .name(format!("region-loader-{}", index))
                    .spawn(move || {
                        while let Ok(job) = rx.recv() {
                            run_load_job(job);
                        }
                    })
                    .expect("failed to spawn region loader thread")
            })
            .collect();

        Self {
            tx: Some(tx),
            workers,
        }
    }

    fn submit(&self, job: LoadJob) {
        if let Some(tx) = &self.tx {
            // Receiver lives as long as the workers do.
            let _ = tx.send(job);
        }
    }
}

impl Drop for LoaderPool {
    fn drop(&mut self) {
        self.tx.take();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

fn run_load_job(job: LoadJob) {
    if !job.delay.is_zero() {
        thread::sleep(job.delay);
    }

    // Clone out of the map first so no shard guard is held across the
    // remove below.
    let fault = job.entry.faults.get(&job.region).map(|f| f.clone());
    let outcome = match fault {
        Some(RegionLoadError::Unavailable) => Err(RegionLoadError::Unavailable),
        Some(fault @ RegionLoadError::Failed(_)) => {
            // One-shot fault: the next load of this region succeeds.
            job.entry.faults.remove(&job.region);
            Err(fault)
        }
        None => {
            job.entry.resident.insert(job.region);
            Ok(())
        }
    };

    // The requester may have been cancelled and dropped its receiver; the
    // load result is simply discarded then.
    let _ = job.done.send(outcome);
}

/// In-memory `WorldAccessor` implementation.
pub struct MemoryWorld {
    worlds: DashMap<WorldId, Arc<WorldEntry>>,
    pool: LoaderPool,
    load_delay: Duration,
}

impl MemoryWorld {
    pub fn new() -> Self {
        let workers = num_cpus::get().clamp(1, 4);
        Self {
            worlds: DashMap::new(),
            pool: LoaderPool::new(workers),
            load_delay: Duration::ZERO,
        }
    }

    /// Simulate slow storage: every load takes at least this long.
    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }

    /// Add a world whose block data is defined by `generator`.
    pub fn add_world<G>(&self, world: WorldId, bounds: WorldBounds, generator: G)
    where
        G: Fn(BlockPos) -> BlockId + Send + Sync + 'static,
    {
        self.worlds.insert(
            world,
            Arc::new(WorldEntry {
                bounds,
                generator: Box::new(generator),
                resident: DashSet::new(),
                overrides: DashMap::new(),
                faults: DashMap::new(),
            }),
        );
    }

    /// Override a single block, e.g. to carve a hazard into a test world.
    pub fn set_block(&self, location: Location, block: BlockId) {
        if let Some(entry) = self.worlds.get(&location.world) {
            entry.overrides.insert(location.pos, block);
        }
    }

    /// Make a region resident immediately, bypassing the loader.
    pub fn mark_region_resident(&self, world: WorldId, region: RegionPos) {
        if let Some(entry) = self.worlds.get(&world) {
            entry.resident.insert(region);
        }
    }

    /// Script the next load of `region` to fail. `RegionLoadError::Failed`
    /// fires once; `RegionLoadError::Unavailable` is permanent.
    pub fn inject_fault(&self, world: WorldId, region: RegionPos, fault: RegionLoadError) {
        if let Some(entry) = self.worlds.get(&world) {
            entry.faults.insert(region, fault);
        }
    }
}

impl Default for MemoryWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldAccessor for MemoryWorld {
    fn bounds(&self, world: WorldId) -> Option<WorldBounds> {
        self.worlds.get(&world).map(|entry| entry.bounds)
    }

    fn is_region_resident(&self, world: WorldId, region: RegionPos) -> bool {
        self.worlds
            .get(&world)
            .map(|entry| entry.resident.contains(&region))
            .unwrap_or(false)
    }

    fn request_region_load(
        &self,
        world: WorldId,
        region: RegionPos,
    ) -> BoxFuture<'static, Result<(), RegionLoadError>> {
        let (done, rx) = oneshot::channel();

        match self.worlds.get(&world) {
            Some(entry) => {
                self.pool.submit(LoadJob {
                    entry: Arc::clone(&entry),
                    region,
                    delay: self.load_delay,
                    done,
                });
            }
            None => {
                let _ = done.send(Err(RegionLoadError::Failed(format!(
                    "unknown world {}",
                    world
                ))));
            }
        }

        Box::pin(async move {
            rx.await
                .unwrap_or_else(|_| Err(RegionLoadError::Failed("loader shut down".to_string())))
        })
    }

    fn block_at(&self, location: Location) -> Option<BlockId> {
        let entry = self.worlds.get(&location.world)?;
        if !entry.bounds.contains_y(location.pos.y)
            || !entry.bounds.contains_column(location.pos.column())
        {
            return None;
        }
        if !entry.resident.contains(&location.pos.region()) {
            return None;
        }
        if let Some(block) = entry.overrides.get(&location.pos) {
            return Some(*block);
        }
        Some((entry.generator)(location.pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_world(ground_y: i32) -> impl Fn(BlockPos) -> BlockId {
        move |pos| {
            if pos.y < ground_y {
                BlockId::STONE
            } else if pos.y == ground_y {
                BlockId::GRASS
            } else {
                BlockId::AIR
            }
        }
    }

    #[tokio::test]
    async fn test_block_reads_require_residency() {
        let world = MemoryWorld::new();
        let id = WorldId(1);
        world.add_world(id, WorldBounds::new(0, 256), flat_world(64));

        let loc = Location::new(id, BlockPos::new(5, 64, 5));
        assert_eq!(world.block_at(loc), None);

        world
            .request_region_load(id, loc.pos.region())
            .await
            .expect("load should succeed");
        assert!(world.is_region_resident(id, loc.pos.region()));
        assert_eq!(world.block_at(loc), Some(BlockId::GRASS));
        assert_eq!(
            world.block_at(Location::new(id, BlockPos::new(5, 65, 5))),
            Some(BlockId::AIR)
        );
    }

    #[tokio::test]
    async fn test_overrides_shadow_generator() {
        let world = MemoryWorld::new();
        let id = WorldId(1);
        world.add_world(id, WorldBounds::new(0, 256), flat_world(64));

        let loc = Location::new(id, BlockPos::new(0, 64, 0));
        world.set_block(loc, BlockId::LAVA);
        world.mark_region_resident(id, loc.pos.region());

        assert_eq!(world.block_at(loc), Some(BlockId::LAVA));
    }

    #[tokio::test]
    async fn test_injected_faults() {
        let world = MemoryWorld::new();
        let id = WorldId(1);
        world.add_world(id, WorldBounds::new(0, 256), flat_world(64));

        let region = RegionPos { x: 0, z: 0 };
        world.inject_fault(id, region, RegionLoadError::Failed("disk error".to_string()));

        let first = world.request_region_load(id, region).await;
        assert!(matches!(first, Err(RegionLoadError::Failed(_))));
        assert!(!world.is_region_resident(id, region));

        // One-shot fault: retry succeeds.
        let second = world.request_region_load(id, region).await;
        assert_eq!(second, Ok(()));
        assert!(world.is_region_resident(id, region));
    }

    #[tokio::test]
    async fn test_unavailable_is_permanent() {
        let world = MemoryWorld::new();
        let id = WorldId(1);
        world.add_world(id, WorldBounds::new(0, 256), flat_world(64));

        let region = RegionPos { x: 3, z: -2 };
        world.inject_fault(id, region, RegionLoadError::Unavailable);

        for _ in 0..2 {
            let outcome = world.request_region_load(id, region).await;
            assert_eq!(outcome, Err(RegionLoadError::Unavailable));
        }
    }

    #[test]
    fn test_out_of_bounds_reads() {
        let world = MemoryWorld::new();
        let id = WorldId(1);
        world.add_world(
            id,
            WorldBounds::new(0, 128).with_border(50),
            flat_world(64),
        );
        world.mark_region_resident(id, RegionPos { x: 0, z: 0 });
        world.mark_region_resident(id, RegionPos { x: 3, z: 0 });

        // Below floor and above ceiling.
        assert_eq!(world.block_at(Location::new(id, BlockPos::new(0, -1, 0))), None);
        assert_eq!(world.block_at(Location::new(id, BlockPos::new(0, 128, 0))), None);
        // Outside the border, even though the region is resident.
        assert_eq!(world.block_at(Location::new(id, BlockPos::new(99, 64, 0))), None);
    }
}
