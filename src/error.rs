//! Error taxonomy for the teleport search service.
//!
//! Only catalog misconfiguration and total search failure ever reach the
//! caller. Per-attempt anomalies (a kernel draw outside the world, a
//! transient region-load failure, a validator rejection) are absorbed by
//! the search loop as rejected candidates and never propagate.

use crate::world::{RegionPos, WorldId};

/// Result alias used throughout the crate.
pub type RtpResult<T> = Result<T, RtpError>;

/// Terminal failures of the search service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RtpError {
    /// The requested kernel name is not registered. Corrected by the
    /// caller, not by the service.
    #[error("unknown kernel '{name}'")]
    UnknownKernel { name: String },

    /// A kernel is already registered under this name. The original
    /// registration is unaffected.
    #[error("kernel '{name}' is already registered")]
    DuplicateName { name: String },

    /// Registration was attempted after the catalog was sealed.
    #[error("kernel catalog is sealed")]
    CatalogSealed,

    /// The search envelope failed validation.
    #[error("invalid search envelope: {reason}")]
    InvalidEnvelope { reason: String },

    /// The world accessor does not know the requested world.
    #[error("unknown world {world}")]
    UnknownWorld { world: WorldId },

    /// Attempt and/or time budget exhausted without an accepted location.
    /// An expected, recoverable outcome the caller must handle.
    #[error("no safe location found after {attempts} attempts")]
    NoSafeLocationFound { attempts: u32 },

    /// The backing store reported a region as permanently unavailable.
    #[error("region {region} is unavailable")]
    RegionUnavailable { region: RegionPos },

    /// The caller withdrew the request. A normal terminal state, not a
    /// fault.
    #[error("search cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RtpError::UnknownKernel {
            name: "warp9".to_string(),
        };
        assert_eq!(err.to_string(), "unknown kernel 'warp9'");

        let err = RtpError::NoSafeLocationFound { attempts: 50 };
        assert_eq!(err.to_string(), "no safe location found after 50 attempts");
    }
}
