//! Random-teleport search walkthrough
//!
//! This example wires the in-memory reference world to the search
//! service, registers a custom kernel alongside the built-ins, and runs a
//! handful of searches on a simulation context.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use wayfinder::rtp::{CandidateColumn, VerticalScan};
use wayfinder::{
    BlockId, BlockPos, BlockRegistry, CancelToken, Kernel, KernelCatalog, Location, MemoryWorld,
    RtpConfig, RtpService, SearchEnvelope, SearchRequest, SimulationContext, WorldBounds, WorldId,
};

const OVERWORLD: WorldId = WorldId(0);

/// A third-party kernel: always proposes the column east of the origin at
/// the outer radius.
#[derive(Debug)]
struct EastwardKernel;

impl Kernel for EastwardKernel {
    fn name(&self) -> &str {
        "demo:eastward"
    }

    fn sample(
        &self,
        envelope: &SearchEnvelope,
        _anchor: Location,
        bounds: WorldBounds,
        _rng: &mut StdRng,
    ) -> Option<CandidateColumn> {
        let mut column = envelope.origin().pos.column();
        column.x += envelope.max_radius() as i32;
        if !bounds.contains_column(column) {
            return None;
        }
        Some(CandidateColumn {
            column,
            scan: VerticalScan::TopDown,
        })
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Wayfinder RTP demo");

    // Rolling terrain with lava pools on a stripe of columns.
    let world = MemoryWorld::new().with_load_delay(Duration::from_millis(10));
    world.add_world(OVERWORLD, WorldBounds::new(0, 256), |pos| {
        let ground = 64 + ((pos.x as f64 / 40.0).sin() * 6.0) as i32;
        if pos.y > ground {
            BlockId::AIR
        } else if pos.y == ground {
            if pos.z.rem_euclid(16) == 0 {
                BlockId::LAVA
            } else {
                BlockId::GRASS
            }
        } else {
            BlockId::STONE
        }
    });

    // Startup path: defaults plus one third-party kernel, then seal.
    let catalog = Arc::new(KernelCatalog::with_defaults());
    catalog.register(Arc::new(EastwardKernel))?;
    catalog.seal();
    println!("[OK] catalog sealed with kernels: {:?}", catalog.names());

    let service = Arc::new(RtpService::new(
        catalog,
        Arc::new(world),
        Arc::new(BlockRegistry::with_defaults()),
        RtpConfig::default(),
    )?);

    let sim = SimulationContext::new()?;
    let origin = Location::new(OVERWORLD, BlockPos::new(0, 64, 7));

    for kernel in ["default", "surface", "demo:eastward"] {
        let envelope = SearchEnvelope::new(origin, 8, 96)?;
        let request = SearchRequest::new(envelope, kernel)
            .with_max_attempts(64)
            .with_time_budget(Duration::from_secs(5));

        match sim.run_search(&service, request, CancelToken::new()) {
            Ok(accepted) => println!("[OK] kernel '{}' accepted {}", kernel, accepted),
            Err(err) => println!("[!!] kernel '{}' failed: {}", kernel, err),
        }
    }

    // A cancelled request resolves to the Cancelled terminal state.
    let cancel = CancelToken::new();
    cancel.cancel();
    let envelope = SearchEnvelope::new(origin, 8, 96)?;
    let outcome = sim.run_search(
        &service,
        SearchRequest::new(envelope, "default"),
        cancel,
    );
    println!("[OK] pre-cancelled search resolved to: {:?}", outcome);

    Ok(())
}
