use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::core::REGION_SIZE;

/// Identifies one world within the host.
///
/// World naming and UUID remapping belong to the host's world-identity
/// service; this is only the value the host keys its worlds by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct WorldId(pub u64);

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "world#{}", self.0)
    }
}

/// A block position within one world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The (x, z) column this position belongs to.
    pub fn column(self) -> ColumnPos {
        ColumnPos {
            x: self.x,
            z: self.z,
        }
    }

    /// The region backing this position.
    pub fn region(self) -> RegionPos {
        self.column().region()
    }

    /// Same column, shifted `dy` blocks vertically.
    pub fn offset_y(self, dy: i32) -> Self {
        Self {
            x: self.x,
            y: self.y + dy,
            z: self.z,
        }
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// An (x, z) column of blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnPos {
    pub x: i32,
    pub z: i32,
}

impl ColumnPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The region backing this column.
    pub fn region(self) -> RegionPos {
        let size = REGION_SIZE as i32;
        RegionPos {
            x: self.x.div_euclid(size),
            z: self.z.div_euclid(size),
        }
    }

    /// The block position at height `y` in this column.
    pub fn at(self, y: i32) -> BlockPos {
        BlockPos {
            x: self.x,
            y,
            z: self.z,
        }
    }

    /// Squared horizontal distance to another column.
    pub fn distance_sq(self, other: ColumnPos) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dz = (self.z - other.z) as i64;
        dx * dx + dz * dz
    }
}

/// Residency unit: a `REGION_SIZE` x `REGION_SIZE` slice of world spanning
/// the full vertical extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionPos {
    pub x: i32,
    pub z: i32,
}

impl fmt::Display for RegionPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region({}, {})", self.x, self.z)
    }
}

/// A world plus a position in it. Equality and hashing by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub world: WorldId,
    pub pos: BlockPos,
}

impl Location {
    pub const fn new(world: WorldId, pos: BlockPos) -> Self {
        Self { world, pos }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.world, self.pos)
    }
}

/// Extent of a world: vertical range `[floor, ceiling)`, plus an optional
/// horizontal border (half-extent from the axis origin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldBounds {
    /// Lowest layer that holds blocks.
    pub floor: i32,
    /// First layer above the block range.
    pub ceiling: i32,
    /// World border, if the world is finite: columns with |x| or |z|
    /// greater than this are outside the world.
    pub border: Option<u32>,
}

impl WorldBounds {
    pub const fn new(floor: i32, ceiling: i32) -> Self {
        Self {
            floor,
            ceiling,
            border: None,
        }
    }

    pub const fn with_border(mut self, border: u32) -> Self {
        self.border = Some(border);
        self
    }

    pub fn contains_y(&self, y: i32) -> bool {
        y >= self.floor && y < self.ceiling
    }

    /// Whether a column lies inside the world border.
    pub fn contains_column(&self, column: ColumnPos) -> bool {
        match self.border {
            Some(border) => {
                let border = border as i64;
                (column.x as i64).abs() <= border && (column.z as i64).abs() <= border
            }
            None => true,
        }
    }

    /// Intersect the vertical range with `[min_y, max_y]` (inclusive).
    pub fn clamp_vertical(&self, min_y: i32, max_y: i32) -> Self {
        Self {
            floor: self.floor.max(min_y),
            ceiling: self.ceiling.min(max_y.saturating_add(1)),
            border: self.border,
        }
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::new(
            crate::constants::core::WORLD_FLOOR,
            crate::constants::core::WORLD_CEILING,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_to_region_conversion() {
        let col = ColumnPos::new(65, -15);
        let region = col.region();

        // 65 / 32 = 2, -15 / 32 = -1 (euclidean)
        assert_eq!(region.x, 2);
        assert_eq!(region.z, -1);
    }

    #[test]
    fn test_region_boundary_columns() {
        assert_eq!(ColumnPos::new(0, 0).region(), RegionPos { x: 0, z: 0 });
        assert_eq!(ColumnPos::new(-1, 31).region(), RegionPos { x: -1, z: 0 });
        assert_eq!(ColumnPos::new(32, -32).region(), RegionPos { x: 1, z: -1 });
    }

    #[test]
    fn test_location_equality_by_value() {
        let a = Location::new(WorldId(7), BlockPos::new(1, 64, -3));
        let b = Location::new(WorldId(7), BlockPos::new(1, 64, -3));
        assert_eq!(a, b);

        let c = Location::new(WorldId(8), BlockPos::new(1, 64, -3));
        assert_ne!(a, c);
    }

    #[test]
    fn test_bounds_border() {
        let bounds = WorldBounds::new(0, 256).with_border(100);
        assert!(bounds.contains_column(ColumnPos::new(100, -100)));
        assert!(!bounds.contains_column(ColumnPos::new(101, 0)));

        let open = WorldBounds::new(0, 256);
        assert!(open.contains_column(ColumnPos::new(1_000_000, 0)));
    }

    #[test]
    fn test_bounds_clamp_vertical() {
        let bounds = WorldBounds::new(0, 256).clamp_vertical(10, 80);
        assert_eq!(bounds.floor, 10);
        assert_eq!(bounds.ceiling, 81);
        assert!(bounds.contains_y(80));
        assert!(!bounds.contains_y(81));
    }
}
