//! Error types for fixture rendering.

use std::path::PathBuf;

use thiserror::Error;

use crate::LayoutConfig;

/// Result type alias using FixtureError.
pub type FixtureResult<T> = Result<T, FixtureError>;

/// Primary error type for rendering and overlay operations.
#[derive(Debug, Error)]
pub enum FixtureError {
    // === Constraint Errors ===
    #[error("Failed to read constraints file {path}: {source}")]
    ConstraintsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid constraints: {0}")]
    ConstraintsParse(String),

    #[error("Grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Expected {expected} row clues (height), found {actual}")]
    RowCountMismatch { expected: usize, actual: usize },

    #[error("Expected {expected} column clues (width), found {actual}")]
    ColumnCountMismatch { expected: usize, actual: usize },

    #[error("Failed to read markings file {path}: {source}")]
    MarkingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid markings: {0}")]
    MarkingsParse(String),

    // === Layout Errors ===
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error(
        "Layout mismatch: image was rendered with cell_size={} margin_left={} margin_top={}, \
         but cell_size={} margin_left={} margin_top={} was requested",
        recorded.cell_size, recorded.margin_left, recorded.margin_top,
        requested.cell_size, requested.margin_left, requested.margin_top
    )]
    GeometryMismatch {
        recorded: LayoutConfig,
        requested: LayoutConfig,
    },

    #[error("Cell ({row}, {col}) is outside the {width}x{height} grid")]
    CellOutOfRange {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },

    // === Image Errors ===
    #[error("Failed to open image {path}: {message}")]
    ImageRead { path: PathBuf, message: String },

    #[error("Failed to write image {path}: {message}")]
    ImageWrite { path: PathBuf, message: String },

    // === Sidecar Errors ===
    #[error("Failed to read layout record {path}: {message}")]
    SidecarRead { path: PathBuf, message: String },

    #[error("Failed to write layout record {path}: {message}")]
    SidecarWrite { path: PathBuf, message: String },
}

impl FixtureError {
    /// Process exit code for this error: 2 for bad inputs, 1 for environment failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            FixtureError::ConstraintsParse(_)
            | FixtureError::InvalidDimensions { .. }
            | FixtureError::RowCountMismatch { .. }
            | FixtureError::ColumnCountMismatch { .. }
            | FixtureError::MarkingsParse(_)
            | FixtureError::InvalidLayout(_)
            | FixtureError::GeometryMismatch { .. }
            | FixtureError::CellOutOfRange { .. } => 2,

            _ => 1,
        }
    }
}

impl From<serde_json::Error> for FixtureError {
    fn from(err: serde_json::Error) -> Self {
        FixtureError::ConstraintsParse(err.to_string())
    }
}
