//! Wayfinder Engine - safe random-teleport search for block worlds.
//!
//! Given an origin and a search envelope, the engine produces a point
//! that satisfies solidity, clearance, and hazard constraints, trying
//! candidate points under bounded attempt and time budgets. Sampling
//! strategies ("kernels") are pluggable and chosen by name; region data
//! backing a candidate is fetched asynchronously so the simulation
//! context never stalls.
//!
//! The engine owns no world data and no player plumbing. Hosts implement
//! [`world::WorldAccessor`], build a [`rtp::KernelCatalog`] during
//! startup (registering any third-party kernels before sealing it), and
//! drive [`rtp::RtpService`] futures on their simulation context - or on
//! the bundled [`sim::SimulationContext`].

pub mod constants;
pub mod error;
pub mod rtp;
pub mod sim;
pub mod world;

use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;

pub use error::{RtpError, RtpResult};
pub use rtp::{
    CancelToken, Kernel, KernelCatalog, ReferencePoint, RtpService, SafetyValidator,
    SearchEnvelope, SearchRequest,
};
pub use sim::SimulationContext;
pub use world::{
    BlockId, BlockPos, BlockRegistry, ColumnPos, Location, MemoryWorld, RegionPos, WorldAccessor,
    WorldBounds, WorldId,
};

/// Service configuration.
///
/// Everything here is host policy: the per-search budgets used when a
/// request does not override them, and the set of block names considered
/// hazardous to stand on or in.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RtpConfig {
    /// Sampling rounds per search unless the request overrides it.
    pub max_attempts: u32,
    /// Wall-clock budget per search, in milliseconds, unless the request
    /// overrides it.
    pub time_budget_ms: u64,
    /// Block names resolved against the block registry when the service
    /// is built. Unknown names fail construction.
    pub hazard_blocks: Vec<String>,
}

impl Default for RtpConfig {
    fn default() -> Self {
        Self {
            max_attempts: constants::budget::MAX_ATTEMPTS,
            time_budget_ms: constants::budget::TIME_BUDGET_MS,
            hazard_blocks: ["lava", "fire", "magma", "cactus"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl RtpConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(anyhow::anyhow!("RtpConfig: max_attempts cannot be 0"));
        }
        if self.time_budget_ms == 0 {
            return Err(anyhow::anyhow!("RtpConfig: time_budget_ms cannot be 0"));
        }

        log::debug!(
            "[RtpConfig] validated: max_attempts={}, time_budget_ms={}, {} hazard blocks",
            self.max_attempts,
            self.time_budget_ms,
            self.hazard_blocks.len()
        );
        Ok(())
    }

    /// Load and validate a config from a TOML file.
    pub fn from_toml_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config {}: {}", path.display(), e))?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("failed to parse config {}: {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// The default time budget as a `Duration`.
    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }
}
