//! Error handling for exckit geometry
//!
//! Every shape-producing operation (synthesis, arrays, resizing) fails
//! locally and synchronously with a [`GeometryError`]. Nothing is retried;
//! the caller reports the message and leaves its shape store untouched.

use thiserror::Error;

/// Geometry error type
///
/// Covers invalid construction parameters, degenerate arrays and resize
/// requests that cannot be honoured.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Non-positive diameter, or a slot shorter than its own width
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry {
        /// Why the parameters were rejected.
        reason: String,
    },

    /// Array that cannot be laid out (zero radius, zero items)
    #[error("Degenerate array: {reason}")]
    DegenerateArray {
        /// Why the array is degenerate.
        reason: String,
    },

    /// Circular array whose total sweep exceeds a full turn
    #[error("Too many items for the selected spacing angle: {count} x {step_deg}\u{b0} exceeds 360\u{b0}")]
    ArrayOverflow {
        /// Requested number of items.
        count: u32,
        /// Angular pitch between items, in degrees.
        step_deg: f64,
    },

    /// Non-positive target diameter on resize
    #[error("Invalid resize: {reason}")]
    InvalidResize {
        /// Why the resize was rejected.
        reason: String,
    },

    /// Zero-area or malformed polygon handed to the resize engine
    #[error("Degenerate geometry: {reason}")]
    DegenerateGeometry {
        /// What made the polygon unusable.
        reason: String,
    },
}

impl GeometryError {
    /// Shorthand for [`GeometryError::InvalidGeometry`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`GeometryError::DegenerateArray`].
    pub fn degenerate_array(reason: impl Into<String>) -> Self {
        Self::DegenerateArray {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`GeometryError::InvalidResize`].
    pub fn invalid_resize(reason: impl Into<String>) -> Self {
        Self::InvalidResize {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`GeometryError::DegenerateGeometry`].
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            reason: reason.into(),
        }
    }
}

/// Result type alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
