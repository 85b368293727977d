use rand::rngs::StdRng;

use crate::rtp::envelope::SearchEnvelope;
use crate::rtp::kernel::{CandidateColumn, Kernel, VerticalScan};
use crate::world::{Location, WorldBounds};

use super::sample_annulus;

/// Origin-centered draw restricted to the topmost exposed surface: no
/// candidate below an overhang or inside a cave. A column whose surface
/// is not standable yields nothing for that attempt.
#[derive(Debug)]
pub struct SurfaceKernel;

impl Kernel for SurfaceKernel {
    fn name(&self) -> &str {
        "surface"
    }

    fn sample(
        &self,
        envelope: &SearchEnvelope,
        _anchor: Location,
        bounds: WorldBounds,
        rng: &mut StdRng,
    ) -> Option<CandidateColumn> {
        let column = sample_annulus(
            envelope.origin().pos.column(),
            envelope.min_radius(),
            envelope.max_radius(),
            rng,
        );
        if !bounds.contains_column(column) {
            return None;
        }
        Some(CandidateColumn {
            column,
            scan: VerticalScan::SurfaceOnly,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{BlockPos, WorldId};
    use rand::SeedableRng;

    #[test]
    fn test_declares_surface_scan() {
        let origin = Location::new(WorldId(1), BlockPos::new(0, 64, 0));
        let envelope = SearchEnvelope::new(origin, 0, 16).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let candidate = SurfaceKernel
            .sample(&envelope, origin, WorldBounds::new(0, 256), &mut rng)
            .unwrap();
        assert_eq!(candidate.scan, VerticalScan::SurfaceOnly);
    }
}
