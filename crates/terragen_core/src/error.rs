//! Error types for the generation pipeline.
//!
//! Every error is terminal for the file being processed: the pipeline
//! never repairs, defaults, or partially accepts. Batch callers isolate
//! failures per file.

use thiserror::Error;

use crate::identity::MapIdentity;
use crate::thresholds::Tier;

/// Result type alias using [`TerragenError`].
pub type Result<T> = std::result::Result<T, TerragenError>;

/// Top-level error type for all generation pipeline errors.
#[derive(Debug, Error)]
pub enum TerragenError {
    /// Structural defect in a tile-map source document.
    #[error("Malformed source in layer '{layer}': {detail}")]
    MalformedSource {
        /// Name of the offending layer (or `document` for file-level defects).
        layer: String,
        /// What was wrong, including the row index where applicable.
        detail: String,
    },

    /// Grid dimensions exceed the configured world bounds.
    #[error("Map dimensions {width}x{height} exceed world bounds {x_bounds}x{y_bounds}")]
    BoundsViolation {
        /// Actual grid width.
        width: u32,
        /// Actual grid height.
        height: u32,
        /// Maximum allowed width.
        x_bounds: u32,
        /// Maximum allowed height.
        y_bounds: u32,
    },

    /// Probability thresholds are non-monotonic or out of range.
    #[error("Invalid threshold configuration: {0}")]
    InvalidThresholdConfig(String),

    /// No resource resolution exists for a tier/identity pair.
    #[error("No resource mapping for tier {tier} on map {identity}")]
    UnmappedTier {
        /// Map identity that lacked a catalog entry.
        identity: MapIdentity,
        /// Tier that could not be resolved.
        tier: Tier,
    },

    /// Post-encode size or shape mismatch.
    #[error("Encoding integrity violation: {0}")]
    EncodingIntegrityError(String),

    /// Total elite-tier cell count exceeds the configured ceiling.
    #[error("Elite asteroid count {count} exceeds ceiling {ceiling}")]
    EliteCeilingExceeded {
        /// Elite cells found in the encoded map.
        count: u32,
        /// Configured maximum.
        ceiling: u32,
    },

    /// A reserved spawn cell was encoded with a non-empty resource.
    #[error("Reserved spawn cell ({x}, {y}) was encoded as non-empty")]
    SpawnCellOccupied {
        /// Cell x coordinate.
        x: u32,
        /// Cell y coordinate.
        y: u32,
    },

    /// Failed to parse a generation config document.
    #[error("Failed to parse generation config: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),
}
