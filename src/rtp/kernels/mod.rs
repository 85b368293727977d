//! Built-in sampling kernels.
//!
//! Four strategies ship with the engine, registered under fixed names by
//! `KernelCatalog::register_defaults`:
//!
//! - `default` - uniform draw from the annulus around the envelope
//!   origin, top-down vertical scan
//! - `around_player` - as `default`, but centered on the live reference
//!   point, re-read every attempt
//! - `surface` - origin-centered, restricted to the topmost exposed
//!   surface
//! - `around_player_and_surface` - both constraints at once

mod around_player;
mod around_player_surface;
mod default;
mod surface;

pub use around_player::AroundPlayerKernel;
pub use around_player_surface::AroundPlayerAndSurfaceKernel;
pub use default::DefaultKernel;
pub use surface::SurfaceKernel;

use rand::rngs::StdRng;
use rand::Rng;

use crate::world::ColumnPos;

/// Uniform draw from the annulus `[min_radius, max_radius]` around
/// `center`. Area-correct: the radius is the square root of a uniform
/// draw over squared radii, so candidates do not bunch near the center.
pub(crate) fn sample_annulus(
    center: ColumnPos,
    min_radius: u32,
    max_radius: u32,
    rng: &mut StdRng,
) -> ColumnPos {
    if max_radius == 0 {
        return center;
    }

    let min_sq = (min_radius as f64) * (min_radius as f64);
    let max_sq = (max_radius as f64) * (max_radius as f64);
    let radius = (rng.gen::<f64>() * (max_sq - min_sq) + min_sq).sqrt();
    let theta = rng.gen::<f64>() * std::f64::consts::TAU;

    ColumnPos {
        x: center.x + (radius * theta.cos()).round() as i32,
        z: center.z + (radius * theta.sin()).round() as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_annulus_draws_stay_in_band() {
        let mut rng = StdRng::seed_from_u64(7);
        let center = ColumnPos::new(100, -50);
        for _ in 0..2_000 {
            let col = sample_annulus(center, 8, 32, &mut rng);
            let dist = (col.distance_sq(center) as f64).sqrt();
            assert!(dist >= 8.0 - 0.75, "draw {} under min radius", dist);
            assert!(dist <= 32.0 + 0.75, "draw {} over max radius", dist);
        }
    }

    #[test]
    fn test_zero_radius_degenerates_to_center() {
        let mut rng = StdRng::seed_from_u64(7);
        let center = ColumnPos::new(3, 4);
        assert_eq!(sample_annulus(center, 0, 0, &mut rng), center);
    }

    #[test]
    fn test_same_seed_same_draws() {
        let center = ColumnPos::new(0, 0);
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..64 {
            assert_eq!(
                sample_annulus(center, 4, 64, &mut a),
                sample_annulus(center, 4, 64, &mut b)
            );
        }
    }
}
