//! # Terragen Core
//!
//! Deterministic terrain generation pipeline for the asteroid world maps.
//!
//! This crate contains **only** deterministic logic:
//! - No file IO (callers hand in document text and receive bytes)
//! - No system randomness (all draws come from injected seeded sources)
//! - No ambient configuration (bounds, thresholds, and catalogs are passed in)
//!
//! This separation enables:
//! - Bit-identical regeneration from the same sources and seed
//! - Golden-output regression testing
//! - Parallel batch generation with no coordination
//!
//! ## Pipeline
//!
//! A source document flows through the stages in order, failing fast:
//!
//! 1. [`tile_source`] - parse the tile-map document into a [`grid::TileGrid`]
//! 2. [`grid`] - validate dimensions against the world bounds
//! 3. [`classifier`] - assign resource tiers from seeded probability draws
//! 4. [`catalog`] - resolve tiers into concrete resources and reserves
//! 5. [`encoder`] - serialize into the versioned positional byte format
//! 6. [`validator`] - enforce global invariants before the artifact is accepted

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod encoder;
pub mod error;
pub mod grid;
pub mod identity;
pub mod pipeline;
pub mod rng;
pub mod thresholds;
pub mod tile_source;
pub mod validator;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::catalog::{ResourceCatalog, ResourceId};
    pub use crate::classifier::ClassifiedMap;
    pub use crate::config::{GenerationConfig, SpawnSite};
    pub use crate::encoder::{decode, encode, DecodedMap, FORMAT_VERSION};
    pub use crate::error::{Result, TerragenError};
    pub use crate::grid::{MapBounds, TileGrid};
    pub use crate::identity::MapIdentity;
    pub use crate::pipeline::{generate, GenerationOutput};
    pub use crate::rng::{DrawSource, SeededDraw};
    pub use crate::thresholds::{ProbabilityThresholds, Tier};
}
