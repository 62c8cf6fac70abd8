//! # Overlay Error Types
//!
//! Only configuration problems reach the caller. Measurement trouble and
//! close/open races are normal control flow and never show up here.

use aloft_geometry::GeometryError;
use thiserror::Error;

use crate::layer::LayerId;

/// Errors that can occur in the overlay system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OverlayError {
    /// Bad origin label or measurement, from the geometry layer.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Config values that cannot drive the engine.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A config file that failed to parse.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// A layer id that no instance owns.
    #[error("unknown layer: {0}")]
    UnknownLayer(LayerId),
}

impl From<toml::de::Error> for OverlayError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}

/// Result type for overlay operations.
pub type OverlayResult<T> = Result<T, OverlayError>;
