#![warn(missing_docs)]

//! Helix path generation and tube sweeping for the vspring kernel.
//!
//! The pipeline is split the same way it runs:
//!
//! 1. [`Helix::path`] samples the spring centerline into a [`HelixPath`].
//! 2. [`CrossSection::circle`] builds the wire profile at the first path
//!    point, perpendicular to the initial path direction.
//! 3. [`sweep_profile`] carries that profile along the path on
//!    rotation-minimizing frames and stitches the rings into a [`TubeMesh`].
//!
//! [`sweep_tube`] runs steps 2 and 3 in one call.
//!
//! # Example
//!
//! ```
//! use vspring_kernel_sweep::{sweep_tube, Helix, SweepOptions};
//!
//! let path = Helix::new(1.0, 12.0, 12.0, 24).path().unwrap();
//! assert_eq!(path.len(), 25);
//!
//! let tube = sweep_tube(path.points(), 1.0, 24, &SweepOptions::default()).unwrap();
//! assert_eq!(tube.num_vertices(), 24 * 25);
//! ```

mod cancel;
mod frame;
mod helix;
mod mesh;
mod profile;
mod sweep;

pub use cancel::CancelToken;
pub use frame::{initial_tangent, path_tangents, rotation_minimizing_frames, SweepFrame};
pub use helix::{Helix, HelixPath};
pub use mesh::{Face, TubeMesh};
pub use profile::{CrossSection, DEFAULT_CIRCLE_SEGMENTS};
pub use sweep::{sweep_profile, sweep_tube, SweepOptions};

use thiserror::Error;

/// Errors from helix generation and sweeping.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SweepError {
    /// A numeric input is out of range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The path has too few points to define a sweep direction.
    #[error("path has {0} point(s), at least 2 are required")]
    InsufficientPathLength(usize),

    /// The sweep observed a cancellation request.
    #[error("sweep cancelled")]
    Cancelled,
}

impl SweepError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Check that `value` is a finite, strictly positive length.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<(), SweepError> {
    if !value.is_finite() {
        return Err(SweepError::invalid(name, format!("{value} is not finite")));
    }
    if value <= 0.0 {
        return Err(SweepError::invalid(name, format!("{value} must be > 0")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive() {
        assert!(require_positive("height", 1.0).is_ok());
        assert!(matches!(
            require_positive("height", 0.0),
            Err(SweepError::InvalidParameter { name: "height", .. })
        ));
        assert!(require_positive("height", -2.0).is_err());
        assert!(require_positive("height", f64::NAN).is_err());
        assert!(require_positive("height", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = SweepError::invalid("wire_radius", "0 must be > 0");
        assert_eq!(
            err.to_string(),
            "invalid parameter `wire_radius`: 0 must be > 0"
        );
        assert_eq!(
            SweepError::InsufficientPathLength(1).to_string(),
            "path has 1 point(s), at least 2 are required"
        );
    }
}
