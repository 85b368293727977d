use rand::rngs::StdRng;

use crate::rtp::envelope::SearchEnvelope;
use crate::rtp::kernel::{CandidateColumn, Kernel, VerticalScan};
use crate::world::{Location, WorldBounds};

use super::sample_annulus;

/// Uniform random column across the full annulus around the envelope
/// origin; candidates are scanned top-down from the world ceiling.
#[derive(Debug)]
pub struct DefaultKernel;

impl Kernel for DefaultKernel {
    fn name(&self) -> &str {
        "default"
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
            scan: VerticalScan::TopDown,
        })
    }
}
