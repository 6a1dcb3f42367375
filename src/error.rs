//! Error types for park geometry and settings

use thiserror::Error;

use crate::sim::park::SurfaceKind;

/// Errors raised while building a park catalog
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("{kind:?} at index {index} needs dimensions")]
    MissingDimensions { kind: SurfaceKind, index: usize },

    #[error("ramp at index {index} needs a pitch")]
    MissingPitch { index: usize },

    #[error("{kind:?} at index {index} has invalid dimensions: {reason}")]
    InvalidDimensions {
        kind: SurfaceKind,
        index: usize,
        reason: String,
    },

    #[error("{kind:?} at index {index} has a non-finite position")]
    NonFinitePosition { kind: SurfaceKind, index: usize },

    #[error("wall at index {index} sits on the park center and has no facing axis")]
    AmbiguousWall { index: usize },

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while reading settings from disk
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
