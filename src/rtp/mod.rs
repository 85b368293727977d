//! Random-Teleport Search
//!
//! This module is the heart of the engine:
//!
//! - **Envelope**: the immutable value describing where candidates may
//!   land (`envelope`)
//! - **Safety**: the pure teleport-safety predicate (`safety`)
//! - **Kernels**: pluggable sampling strategies and the four built-ins
//!   (`kernel`, `kernels`)
//! - **Catalog**: the name → kernel registry, sealed after startup
//!   (`catalog`)
//! - **Search**: the orchestrator that ties them together under bounded
//!   attempt and time budgets (`search`)

pub mod catalog;
pub mod envelope;
pub mod kernel;
pub mod kernels;
pub mod safety;
pub mod search;

pub use catalog::KernelCatalog;
pub use envelope::SearchEnvelope;
pub use kernel::{CandidateColumn, Kernel, ReferencePoint, VerticalScan};
pub use kernels::{
    AroundPlayerAndSurfaceKernel, AroundPlayerKernel, DefaultKernel, SurfaceKernel,
};
pub use safety::{BlockView, SafetyValidator, StandingSnapshot};
pub use search::{CancelToken, RtpService, SearchRequest};
