//! # Geometry Error Types
//!
//! All errors that can occur while describing or measuring a placement.

use thiserror::Error;

/// Errors that can occur in the geometry layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// An origin label outside the allowed members for its axis.
    #[error("invalid {axis} origin: {value:?}")]
    InvalidOrigin {
        /// Axis the label was meant for (`vertical` or `horizontal`).
        axis: &'static str,
        /// The rejected label.
        value: String,
    },

    /// A measurement came back detached or collapsed to zero size.
    #[error("{what} is not measurable yet")]
    EmptyMeasurement {
        /// Which element could not be measured (`anchor` or `panel`).
        what: &'static str,
    },
}

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
