//! Error types for the layout pipeline.

use thiserror::Error;

/// Errors surfaced by measurement, packing, and export.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A heights array was consumed against a group sequence it was not
    /// produced from. Packing with mismatched lengths is never attempted;
    /// callers must re-measure.
    #[error("stale measurement: {heights} heights for {groups} groups")]
    StaleMeasurement { groups: usize, heights: usize },

    /// The off-screen layout pass could not produce valid geometry
    /// (non-positive content width, layout engine failure, or non-finite
    /// node dimensions).
    #[error("measurement pass failed: {0}")]
    MeasureFailed(String),

    /// The PDF export adapter failed. Preview styling is always restored
    /// before this is returned.
    #[error("export failed: {0}")]
    ExportFailed(String),

    /// Malformed resume JSON handed to the CLI / pipeline entry points.
    #[error("invalid document: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}
