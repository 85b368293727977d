//! Search orchestration.
//!
//! The orchestrator drives the retry loop: ask the kernel for a candidate
//! column, make the backing region resident (asynchronously, without
//! blocking the simulation context), run the safety validator, and either
//! accept the location or spend another attempt. Attempts are strictly
//! sequential within one search; concurrent searches interleave freely and
//! share only the read-only catalog.
//!
//! Cancellation is cooperative: checked at the top of every sampling
//! round and again when a region load resumes. An in-flight load is never
//! interrupted; its result is simply discarded.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{RtpError, RtpResult};
use crate::world::{BlockRegistry, Location, RegionLoadError, WorldAccessor};
use crate::RtpConfig;

use super::catalog::KernelCatalog;
use super::envelope::SearchEnvelope;
use super::kernel::{resolve_column, ReferencePoint};
use super::safety::SafetyValidator;

/// Cooperative cancellation flag for one search.
///
/// Cloning shares the flag: any clone can cancel, the search observes it
/// at its next suspension point.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// One search invocation.
///
/// `None` budget fields fall back to the service configuration. A `seed`
/// pins the per-search random source, keeping searches reproducible under
/// test; without one the source is seeded from entropy.
pub struct SearchRequest {
    pub envelope: SearchEnvelope,
    pub kernel: String,
    /// Live anchor for the around-player kernels. Re-read before every
    /// attempt.
    pub reference: Option<Arc<dyn ReferencePoint>>,
    pub max_attempts: Option<u32>,
    pub time_budget: Option<Duration>,
    pub seed: Option<u64>,
}

impl SearchRequest {
    pub fn new(envelope: SearchEnvelope, kernel: impl Into<String>) -> Self {
        Self {
            envelope,
            kernel: kernel.into(),
            reference: None,
            max_attempts: None,
            time_budget: None,
            seed: None,
        }
    }

    pub fn with_reference(mut self, reference: Arc<dyn ReferencePoint>) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_time_budget(mut self, time_budget: Duration) -> Self {
        self.time_budget = Some(time_budget);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl fmt::Debug for SearchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchRequest")
            .field("envelope", &self.envelope)
            .field("kernel", &self.kernel)
            .field("reference", &self.reference.as_ref().map(|_| "<live>"))
            .field("max_attempts", &self.max_attempts)
            .field("time_budget", &self.time_budget)
            .field("seed", &self.seed)
            .finish()
    }
}

/// The teleport search service.
///
/// Holds the sealed catalog, the host world accessor, and the safety
/// policy. One instance serves the whole process; every search is an
/// independent invocation of [`RtpService::search`].
pub struct RtpService {
    catalog: Arc<KernelCatalog>,
    accessor: Arc<dyn WorldAccessor>,
    registry: Arc<BlockRegistry>,
    validator: SafetyValidator,
    config: RtpConfig,
}

impl RtpService {
    /// Build the service, resolving the configured hazard set against the
    /// block registry. Fails on invalid configuration or unknown hazard
    /// names.
    pub fn new(
        catalog: Arc<KernelCatalog>,
        accessor: Arc<dyn WorldAccessor>,
        registry: Arc<BlockRegistry>,
        config: RtpConfig,
    ) -> anyhow::Result<Self> {
        config.validate()?;
        let validator =
            SafetyValidator::from_names(&registry, config.hazard_blocks.iter().map(|s| s.as_str()))?;

        log::info!(
            "[RtpService::new] ready: kernels={:?}, hazards={:?}, defaults: attempts={}, budget={}ms",
            catalog.names(),
            config.hazard_blocks,
            config.max_attempts,
            config.time_budget_ms
        );

        Ok(Self {
            catalog,
            accessor,
            registry,
            validator,
            config,
        })
    }

    pub fn catalog(&self) -> &Arc<KernelCatalog> {
        &self.catalog
    }

    /// Run one search to its terminal state.
    ///
    /// The returned future must be polled on the simulation context:
    /// sampling and validation read live world data. The only suspension
    /// point is the region-load await, so unrelated simulation work keeps
    /// running while storage catches up. The result resolves exactly
    /// once.
    pub async fn search(
        &self,
        request: SearchRequest,
        cancel: CancelToken,
    ) -> RtpResult<Location> {
        let kernel = self.catalog.lookup(&request.kernel)?;
        let origin = request.envelope.origin();
        let world = origin.world;
        let world_bounds = self
            .accessor
            .bounds(world)
            .ok_or(RtpError::UnknownWorld { world })?;
        let bounds = request.envelope.clamp_bounds(world_bounds)?;

        let max_attempts = request.max_attempts.unwrap_or(self.config.max_attempts);
        let time_budget = request
            .time_budget
            .unwrap_or_else(|| self.config.time_budget());
        let mut rng = match request.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        log::debug!(
            "[RtpService::search] kernel='{}' origin={} annulus=[{}, {}] attempts<={} budget={:?}",
            request.kernel,
            origin,
            request.envelope.min_radius(),
            request.envelope.max_radius(),
            max_attempts,
            time_budget
        );

        let started = Instant::now();
        let mut attempts: u32 = 0;

        while attempts < max_attempts {
            if cancel.is_cancelled() {
                log::debug!(
                    "[RtpService::search] cancelled after {} attempts",
                    attempts
                );
                return Err(RtpError::Cancelled);
            }
            if started.elapsed() >= time_budget {
                log::debug!(
                    "[RtpService::search] time budget spent after {} attempts",
                    attempts
                );
                break;
            }
            attempts += 1;

            // Sampling. The anchor is re-read every round so a moving
            // reference point shifts the annulus between attempts.
            let anchor = request
                .reference
                .as_ref()
                .map(|r| r.current())
                .unwrap_or(origin);
            let Some(candidate) = kernel.sample(&request.envelope, anchor, bounds, &mut rng)
            else {
                log::trace!(
                    "[RtpService::search] attempt {}: kernel produced no candidate",
                    attempts
                );
                continue;
            };

            // Awaiting region. The load runs on the host's workers; this
            // task suspends without blocking the simulation context.
            let region = candidate.column.region();
            if !self.accessor.is_region_resident(world, region) {
                match self.accessor.request_region_load(world, region).await {
                    Ok(()) => {}
                    Err(RegionLoadError::Failed(error)) => {
                        log::debug!(
                            "[RtpService::search] attempt {}: load of {} failed: {}",
                            attempts,
                            region,
                            error
                        );
                        continue;
                    }
                    Err(RegionLoadError::Unavailable) => {
                        log::warn!(
                            "[RtpService::search] {} is permanently unavailable",
                            region
                        );
                        return Err(RtpError::RegionUnavailable { region });
                    }
                }
                // The requester may have walked away while the region
                // loaded; the loaded data stays cached, the attempt is
                // discarded.
                if cancel.is_cancelled() {
                    log::debug!(
                        "[RtpService::search] cancelled while awaiting {}",
                        region
                    );
                    return Err(RtpError::Cancelled);
                }
            }

            // Validating. Synchronous, on the simulation context.
            if let Some(pos) = resolve_column(
                self.accessor.as_ref(),
                &self.registry,
                &self.validator,
                world,
                bounds,
                &candidate,
            ) {
                log::info!(
                    "[RtpService::search] accepted {} after {} attempts",
                    pos,
                    attempts
                );
                return Ok(Location::new(world, pos));
            }
            log::trace!(
                "[RtpService::search] attempt {}: column ({}, {}) rejected",
                attempts,
                candidate.column.x,
                candidate.column.z
            );
        }

        log::info!(
            "[RtpService::search] no safe location after {} attempts",
            attempts
        );
        Err(RtpError::NoSafeLocationFound { attempts })
    }
}
