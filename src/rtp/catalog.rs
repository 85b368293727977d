//! Kernel catalog.
//!
//! Maps kernel names to kernel instances. The catalog is built on the
//! host's startup path, sealed once the host finishes starting up
//! ("world is ready"), and read-only thereafter. There is no global
//! instance: the host constructs the catalog once and hands it to
//! consumers behind an `Arc`.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::error::{RtpError, RtpResult};

use super::kernel::Kernel;
use super::kernels::{
    AroundPlayerAndSurfaceKernel, AroundPlayerKernel, DefaultKernel, SurfaceKernel,
};

struct CatalogState {
    kernels: FxHashMap<String, Arc<dyn Kernel>>,
    sealed: bool,
    defaults_installed: bool,
}

/// Registry of sampling kernels, keyed by case-insensitive name.
pub struct KernelCatalog {
    state: RwLock<CatalogState>,
}

impl KernelCatalog {
    /// An open, empty catalog.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(CatalogState {
                kernels: FxHashMap::default(),
                sealed: false,
                defaults_installed: false,
            }),
        }
    }

    /// Open catalog with the built-in kernels already installed.
    pub fn with_defaults() -> Self {
        let catalog = Self::new();
        catalog
            .register_defaults()
            .expect("defaults install into an empty catalog");
        catalog
    }

    /// Install the four built-in kernels under their fixed names.
    /// Idempotent; an error only if the catalog was sealed first.
    pub fn register_defaults(&self) -> RtpResult<()> {
        {
            let state = self.state.read();
            if state.defaults_installed {
                return Ok(());
            }
            if state.sealed {
                return Err(RtpError::CatalogSealed);
            }
        }

        self.register(Arc::new(DefaultKernel))?;
        self.register(Arc::new(AroundPlayerKernel))?;
        self.register(Arc::new(SurfaceKernel))?;
        self.register(Arc::new(AroundPlayerAndSurfaceKernel))?;

        self.state.write().defaults_installed = true;
        Ok(())
    }

    /// Register a kernel under its own name.
    ///
    /// Registration is a startup-path operation: callers serialize their
    /// registrations, and once `seal` has run every further attempt fails
    /// with `CatalogSealed`. A name collision fails with `DuplicateName`
    /// and leaves the original registration untouched.
    pub fn register(&self, kernel: Arc<dyn Kernel>) -> RtpResult<()> {
        let name = kernel.name().to_ascii_lowercase();
        let mut state = self.state.write();

        if state.sealed {
            return Err(RtpError::CatalogSealed);
        }
        if state.kernels.contains_key(&name) {
            return Err(RtpError::DuplicateName { name });
        }

        log::info!("[KernelCatalog::register] registered kernel '{}'", name);
        state.kernels.insert(name, kernel);
        Ok(())
    }

    /// One-way transition to read-only. Lookups remain valid from any
    /// thread; registrations fail from here on.
    pub fn seal(&self) {
        let mut state = self.state.write();
        if state.sealed {
            log::warn!("[KernelCatalog::seal] catalog already sealed");
            return;
        }
        state.sealed = true;
        log::info!(
            "[KernelCatalog::seal] catalog sealed with {} kernels",
            state.kernels.len()
        );
    }

    pub fn is_sealed(&self) -> bool {
        self.state.read().sealed
    }

    /// Look up a kernel by name, case-insensitively. Valid in any catalog
    /// state.
    pub fn lookup(&self, name: &str) -> RtpResult<Arc<dyn Kernel>> {
        let key = name.to_ascii_lowercase();
        self.state
            .read()
            .kernels
            .get(&key)
            .cloned()
            .ok_or(RtpError::UnknownKernel { name: key })
    }

    /// Registered kernel names, sorted. For diagnostics and listings.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state.read().kernels.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for KernelCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rtp::envelope::SearchEnvelope;
    use crate::rtp::kernel::{CandidateColumn, VerticalScan};
    use crate::world::{BlockPos, Location, WorldBounds, WorldId};
    use rand::rngs::StdRng;

    #[derive(Debug)]
    struct NamedKernel(&'static str);

    impl Kernel for NamedKernel {
        fn name(&self) -> &str {
            self.0
        }

        fn sample(
            &self,
            envelope: &SearchEnvelope,
            _anchor: Location,
            _bounds: WorldBounds,
            _rng: &mut StdRng,
        ) -> Option<CandidateColumn> {
            Some(CandidateColumn {
                column: envelope.origin().pos.column(),
                scan: VerticalScan::FixedY(envelope.origin().pos.y),
            })
        }
    }

    #[test]
    fn test_defaults_present_under_fixed_names() {
        let catalog = KernelCatalog::with_defaults();
        for name in [
            "default",
            "around_player",
            "surface",
            "around_player_and_surface",
        ] {
            assert!(catalog.lookup(name).is_ok(), "missing builtin '{}'", name);
        }
    }

    #[test]
    fn test_register_defaults_is_idempotent() {
        let catalog = KernelCatalog::with_defaults();
        assert!(catalog.register_defaults().is_ok());
        assert_eq!(catalog.names().len(), 4);
    }

    #[test]
    fn test_duplicate_name_rejected_original_kept() {
        let catalog = KernelCatalog::new();
        catalog.register(Arc::new(NamedKernel("custom"))).unwrap();

        let err = catalog
            .register(Arc::new(NamedKernel("custom")))
            .unwrap_err();
        assert_eq!(
            err,
            RtpError::DuplicateName {
                name: "custom".to_string()
            }
        );
        assert!(catalog.lookup("custom").is_ok());
    }

    #[test]
    fn test_names_are_case_insensitive() {
        let catalog = KernelCatalog::new();
        catalog.register(Arc::new(NamedKernel("MyKernel"))).unwrap();

        assert!(catalog.lookup("mykernel").is_ok());
        assert!(catalog.lookup("MYKERNEL").is_ok());

        // Differing only by case is still a duplicate.
        let err = catalog
            .register(Arc::new(NamedKernel("MYKERNEL")))
            .unwrap_err();
        assert!(matches!(err, RtpError::DuplicateName { .. }));
    }

    #[test]
    fn test_sealed_catalog_rejects_registration() {
        let catalog = KernelCatalog::with_defaults();
        catalog.seal();
        assert!(catalog.is_sealed());

        let err = catalog.register(Arc::new(NamedKernel("late"))).unwrap_err();
        assert_eq!(err, RtpError::CatalogSealed);

        // Previously registered names still resolve.
        assert!(catalog.lookup("default").is_ok());
    }

    #[test]
    fn test_unknown_lookup_fails_in_any_state() {
        let catalog = KernelCatalog::new();
        assert!(matches!(
            catalog.lookup("nope").unwrap_err(),
            RtpError::UnknownKernel { .. }
        ));

        catalog.register_defaults().unwrap();
        catalog.seal();
        assert!(matches!(
            catalog.lookup("nope").unwrap_err(),
            RtpError::UnknownKernel { .. }
        ));
    }
}
