//! World-Facing Types and Contracts
//!
//! Everything the search service knows about a world lives here:
//!
//! - **Core**: positions, world identity, bounds (`position`), materials
//!   (`block`)
//! - **Registry**: block name/property lookup (`registry`)
//! - **Accessor**: the narrow read-side contract the host implements
//!   (`accessor`)
//! - **Memory**: an in-memory reference accessor for tests and demos
//!   (`memory`)
//!
//! The service never mutates world data; mutation, generation, and
//! storage formats all belong to the host.

pub mod accessor;
pub mod block;
pub mod memory;
pub mod position;
pub mod registry;

pub use accessor::{RegionLoadError, WorldAccessor};
pub use block::{BlockId, BlockProperties, BASIC_BLOCKS};
pub use memory::MemoryWorld;
pub use position::{BlockPos, ColumnPos, Location, RegionPos, WorldBounds, WorldId};
pub use registry::{register_basic_blocks, BlockRegistration, BlockRegistry};
