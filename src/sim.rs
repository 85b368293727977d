//! Simulation context.
//!
//! Live world state may only be read from one thread. This wrapper owns a
//! current-thread tokio runtime plus a `LocalSet` and is the place search
//! futures get polled: kernel sampling and safety validation run here,
//! region loads complete on the host's workers and only resume the search
//! on this context. Results are therefore always delivered on the
//! simulation context.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::LocalSet;

use crate::error::RtpResult;
use crate::rtp::{CancelToken, RtpService, SearchRequest};
use crate::world::Location;

pub struct SimulationContext {
    runtime: tokio::runtime::Runtime,
    local: LocalSet,
}

impl SimulationContext {
    pub fn new() -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        log::debug!("[SimulationContext::new] current-thread runtime ready");
        Ok(Self {
            runtime,
            local: LocalSet::new(),
        })
    }

    /// Drive a future to completion on the simulation context. Spawned
    /// local tasks make progress while it runs.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.local.block_on(&self.runtime, future)
    }

    /// Run one search to its terminal state on this context.
    pub fn run_search(
        &self,
        service: &RtpService,
        request: SearchRequest,
        cancel: CancelToken,
    ) -> RtpResult<Location> {
        self.block_on(service.search(request, cancel))
    }

    /// Queue a search as a local task. The returned receiver resolves
    /// exactly once with the terminal outcome; it fires while some other
    /// future is being driven via [`SimulationContext::block_on`].
    pub fn spawn_search(
        &self,
        service: Arc<RtpService>,
        request: SearchRequest,
        cancel: CancelToken,
    ) -> oneshot::Receiver<RtpResult<Location>> {
        let (tx, rx) = oneshot::channel();
        self.local.spawn_local(async move {
            let outcome = service.search(request, cancel).await;
            // The requester may have hung up; the outcome is dropped then.
            let _ = tx.send(outcome);
        });
        rx
    }
}
