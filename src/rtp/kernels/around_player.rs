use rand::rngs::StdRng;

use crate::rtp::envelope::SearchEnvelope;
use crate::rtp::kernel::{CandidateColumn, Kernel, VerticalScan};
use crate::world::{Location, WorldBounds};

use super::sample_annulus;

/// Like `default`, but the annulus is centered on the live reference
/// point. The orchestrator re-reads the anchor before every attempt, so a
/// travelling player drags the annulus along.
#[derive(Debug)]
pub struct AroundPlayerKernel;

impl Kernel for AroundPlayerKernel {
    fn name(&self) -> &str {
        "around_player"
    }

    fn sample(
        &self,
        envelope: &SearchEnvelope,
        anchor: Location,
        bounds: WorldBounds,
        rng: &mut StdRng,
    ) -> Option<CandidateColumn> {
        let column = sample_annulus(
            anchor.pos.column(),
            envelope.min_radius(),
            envelope.max_radius(),
            rng,
        );
        if !bounds.contains_column(column) {
            return None;
        }
        Some(CandidateColumn {
            column,
            scan: VerticalScan::TopDown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{BlockPos, WorldId};
    use rand::SeedableRng;

    #[test]
    fn test_follows_the_anchor() {
        let origin = Location::new(WorldId(1), BlockPos::new(0, 64, 0));
        let envelope = SearchEnvelope::new(origin, 0, 8).unwrap();
        let bounds = WorldBounds::new(0, 256);
        let mut rng = StdRng::seed_from_u64(5);

        // An anchor far from the envelope origin: draws cluster around
        // the anchor, not the origin.
        let anchor = Location::new(WorldId(1), BlockPos::new(500, 64, 500));
        for _ in 0..200 {
            let candidate = AroundPlayerKernel
                .sample(&envelope, anchor, bounds, &mut rng)
                .unwrap();
            assert!(envelope.contains_column_around(anchor.pos.column(), candidate.column));
            assert!(!envelope.contains_column(candidate.column));
        }
    }
}
