use crate::error::{RtpError, RtpResult};
use crate::world::{ColumnPos, Location, WorldBounds};

/// Horizontal slack when testing annulus membership: sampled points are
/// rounded to block columns, which can move them up to half a block on
/// each axis.
const ROUNDING_SLACK: f64 = 0.75;

/// The search envelope: where candidates may land.
///
/// Immutable once constructed; one envelope per search invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchEnvelope {
    origin: Location,
    min_radius: u32,
    max_radius: u32,
    vertical: Option<(i32, i32)>,
}

impl SearchEnvelope {
    /// Create an envelope around `origin` with the given annulus radii.
    pub fn new(origin: Location, min_radius: u32, max_radius: u32) -> RtpResult<Self> {
        if min_radius > max_radius {
            return Err(RtpError::InvalidEnvelope {
                reason: format!(
                    "min radius {} exceeds max radius {}",
                    min_radius, max_radius
                ),
            });
        }
        Ok(Self {
            origin,
            min_radius,
            max_radius,
            vertical: None,
        })
    }

    /// Restrict candidates to heights in `[min_y, max_y]` (inclusive).
    pub fn with_vertical(mut self, min_y: i32, max_y: i32) -> RtpResult<Self> {
        if min_y > max_y {
            return Err(RtpError::InvalidEnvelope {
                reason: format!("vertical range [{}, {}] is empty", min_y, max_y),
            });
        }
        self.vertical = Some((min_y, max_y));
        Ok(self)
    }

    pub fn origin(&self) -> Location {
        self.origin
    }

    pub fn min_radius(&self) -> u32 {
        self.min_radius
    }

    pub fn max_radius(&self) -> u32 {
        self.max_radius
    }

    /// A zero-width envelope degenerates to the origin column only.
    pub fn is_degenerate(&self) -> bool {
        self.max_radius == 0
    }

    /// World bounds intersected with this envelope's vertical clamp.
    pub fn clamp_bounds(&self, world: WorldBounds) -> RtpResult<WorldBounds> {
        let bounds = match self.vertical {
            Some((min_y, max_y)) => world.clamp_vertical(min_y, max_y),
            None => world,
        };
        if bounds.floor >= bounds.ceiling {
            return Err(RtpError::InvalidEnvelope {
                reason: format!(
                    "vertical clamp leaves no layers in [{}, {})",
                    world.floor, world.ceiling
                ),
            });
        }
        Ok(bounds)
    }

    /// Whether a column lies inside the annulus around `center`, with
    /// half-block rounding slack on both edges.
    pub fn contains_column_around(&self, center: ColumnPos, column: ColumnPos) -> bool {
        let dist = (column.distance_sq(center) as f64).sqrt();
        dist + ROUNDING_SLACK >= self.min_radius as f64
            && dist - ROUNDING_SLACK <= self.max_radius as f64
    }

    /// Annulus membership around the envelope origin.
    pub fn contains_column(&self, column: ColumnPos) -> bool {
        self.contains_column_around(self.origin.pos.column(), column)
    }
}
