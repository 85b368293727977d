//! Engine-wide constants.
//!
//! Everything here is a default, not a contract: the values a host may
//! reasonably want to tune are all surfaced through `RtpConfig` or the
//! per-request knobs on `SearchRequest`.

use static_assertions::const_assert;

pub mod core {
    /// Width of a region in blocks. Residency is tracked per (x, z)
    /// region; a region spans the full vertical extent of its world.
    pub const REGION_SIZE: u32 = 32;

    /// Default lowest buildable layer.
    pub const WORLD_FLOOR: i32 = 0;

    /// Default first layer above the buildable range.
    pub const WORLD_CEILING: i32 = 256;

    /// Blocks of clear space a standing body occupies (feet + head).
    pub const HEADROOM_BLOCKS: u32 = 2;
}

pub mod budget {
    /// Default number of sampling rounds before a search gives up.
    pub const MAX_ATTEMPTS: u32 = 32;

    /// Default wall-clock budget for a single search, in milliseconds.
    pub const TIME_BUDGET_MS: u64 = 3_000;
}

// A world must have at least one standable layer between floor and ceiling.
const_assert!(core::WORLD_FLOOR < core::WORLD_CEILING);
const_assert!(core::REGION_SIZE > 0);
const_assert!(core::HEADROOM_BLOCKS == 2);
