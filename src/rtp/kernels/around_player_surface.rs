use rand::rngs::StdRng;

use crate::rtp::envelope::SearchEnvelope;
use crate::rtp::kernel::{CandidateColumn, Kernel, VerticalScan};
use crate::world::{Location, WorldBounds};

use super::sample_annulus;

/// Intersection of `around_player` and `surface`: annulus centered on the
/// live reference point, candidates restricted to the topmost exposed
/// surface.
#[derive(Debug)]
pub struct AroundPlayerAndSurfaceKernel;

impl Kernel for AroundPlayerAndSurfaceKernel {
    fn name(&self) -> &str {
        "around_player_and_surface"
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
            scan: VerticalScan::SurfaceOnly,
        })
    }
}
