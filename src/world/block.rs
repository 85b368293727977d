use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a block type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct BlockId(pub u16);

impl Default for BlockId {
    fn default() -> Self {
        BlockId::AIR
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            BlockId::AIR => write!(f, "Air"),
            BlockId::STONE => write!(f, "Stone"),
            BlockId::GRASS => write!(f, "Grass"),
            BlockId::DIRT => write!(f, "Dirt"),
            BlockId::SAND => write!(f, "Sand"),
            BlockId::GRAVEL => write!(f, "Gravel"),
            BlockId::WATER => write!(f, "Water"),
            BlockId::LAVA => write!(f, "Lava"),
            BlockId::LEAVES => write!(f, "Leaves"),
            BlockId::ICE => write!(f, "Ice"),
            BlockId::SNOW => write!(f, "Snow"),
            BlockId::CACTUS => write!(f, "Cactus"),
            BlockId::FIRE => write!(f, "Fire"),
            BlockId::MAGMA => write!(f, "Magma"),
            BlockId::BEDROCK => write!(f, "Bedrock"),
            BlockId::TALL_GRASS => write!(f, "Tall Grass"),
            BlockId::VINES => write!(f, "Vines"),
            _ => write!(f, "Block({})", self.0),
        }
    }
}

impl BlockId {
    pub const AIR: BlockId = BlockId(0);
    pub const STONE: BlockId = BlockId(1);
    pub const GRASS: BlockId = BlockId(2);
    pub const DIRT: BlockId = BlockId(3);
    pub const SAND: BlockId = BlockId(4);
    pub const GRAVEL: BlockId = BlockId(5);
    pub const WATER: BlockId = BlockId(6);
    pub const LAVA: BlockId = BlockId(7);
    pub const LEAVES: BlockId = BlockId(8);
    pub const ICE: BlockId = BlockId(9);
    pub const SNOW: BlockId = BlockId(10);
    pub const CACTUS: BlockId = BlockId(11);
    pub const FIRE: BlockId = BlockId(12);
    pub const MAGMA: BlockId = BlockId(13);
    pub const BEDROCK: BlockId = BlockId(14);
    pub const TALL_GRASS: BlockId = BlockId(15);
    pub const VINES: BlockId = BlockId(16);

    /// Create a new BlockId from a raw u16 value
    pub const fn new(id: u16) -> Self {
        BlockId(id)
    }
}

/// Material behavior relevant to standing on or inside a block.
///
/// Whether a material is *hazardous* is host policy, configured on the
/// safety validator, and deliberately not part of the material itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockProperties {
    /// Supports weight; a body can stand on top of it.
    pub solid: bool,
    /// Flows and fills its cell; a body inside it is submerged.
    pub liquid: bool,
}

impl BlockProperties {
    pub const SOLID: BlockProperties = BlockProperties {
        solid: true,
        liquid: false,
    };
    pub const EMPTY: BlockProperties = BlockProperties {
        solid: false,
        liquid: false,
    };
    pub const LIQUID: BlockProperties = BlockProperties {
        solid: false,
        liquid: true,
    };

    /// A body can occupy this cell without clipping or drowning.
    pub fn passable(&self) -> bool {
        !self.solid && !self.liquid
    }
}

/// Built-in material table registered by `register_basic_blocks`.
pub const BASIC_BLOCKS: &[(BlockId, &str, BlockProperties)] = &[
    (BlockId::AIR, "air", BlockProperties::EMPTY),
    (BlockId::STONE, "stone", BlockProperties::SOLID),
    (BlockId::GRASS, "grass", BlockProperties::SOLID),
    (BlockId::DIRT, "dirt", BlockProperties::SOLID),
    (BlockId::SAND, "sand", BlockProperties::SOLID),
    (BlockId::GRAVEL, "gravel", BlockProperties::SOLID),
    (BlockId::WATER, "water", BlockProperties::LIQUID),
    (BlockId::LAVA, "lava", BlockProperties::LIQUID),
    (BlockId::LEAVES, "leaves", BlockProperties::SOLID),
    (BlockId::ICE, "ice", BlockProperties::SOLID),
    (BlockId::SNOW, "snow", BlockProperties::EMPTY),
    (BlockId::CACTUS, "cactus", BlockProperties::SOLID),
    (BlockId::FIRE, "fire", BlockProperties::EMPTY),
    (BlockId::MAGMA, "magma", BlockProperties::SOLID),
    (BlockId::BEDROCK, "bedrock", BlockProperties::SOLID),
    (BlockId::TALL_GRASS, "tall_grass", BlockProperties::EMPTY),
    (BlockId::VINES, "vines", BlockProperties::EMPTY),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_id_constants() {
        assert_eq!(BlockId::AIR, BlockId(0));
        assert_ne!(BlockId::STONE, BlockId::AIR);
        assert_eq!(BlockId::default(), BlockId::AIR);
    }

    #[test]
    fn test_passable() {
        assert!(BlockProperties::EMPTY.passable());
        assert!(!BlockProperties::SOLID.passable());
        assert!(!BlockProperties::LIQUID.passable());
    }
}
