//! Generation configuration.
//!
//! All knobs the pipeline consumes read-only: world bounds, probability
//! thresholds, reserve constants, the elite ceiling inputs, spawn sites,
//! and the generation seed. Deserializable from RON so deploys can retune
//! without code edits; every field defaults to the shipped world values.
//!
//! File loading is handled by `terragen_tools` - this module only parses
//! document text.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::MapBounds;
use crate::thresholds::ProbabilityThresholds;

/// Side length of the square footprint reserved around a spawn site.
pub const SPAWN_FOOTPRINT: u32 = 3;

/// A reserved base/home position.
///
/// The spawn footprint is a [`SPAWN_FOOTPRINT`]-sided square centered on
/// the site; every cell it covers is excluded from classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnSite {
    /// Site x coordinate.
    pub x: u32,
    /// Site y coordinate.
    pub y: u32,
}

impl SpawnSite {
    /// Create a spawn site.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Whether the footprint covers the cell at `(x, y)`.
    #[must_use]
    pub const fn covers(&self, x: u32, y: u32) -> bool {
        let radius = SPAWN_FOOTPRINT / 2;
        x.abs_diff(self.x) <= radius && y.abs_diff(self.y) <= radius
    }
}

/// Configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Maximum grid dimensions.
    pub bounds: MapBounds,
    /// Cumulative tier cutoffs.
    pub thresholds: ProbabilityThresholds,
    /// Base reserve quantity; scaled by tier rank at assignment.
    pub base_reserve: u64,
    /// Per-player asteroid allowance feeding the elite ceiling.
    pub max_asteroids_per_player: u32,
    /// Expected player population feeding the elite ceiling.
    pub expected_players: u32,
    /// Reserved spawn sites. Empty means one default site at grid center.
    pub spawn_sites: Vec<SpawnSite>,
    /// Generation seed.
    pub seed: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            bounds: MapBounds::default(),
            thresholds: ProbabilityThresholds::default(),
            base_reserve: 100,
            max_asteroids_per_player: 6,
            expected_players: 64,
            spawn_sites: Vec::new(),
            seed: 0,
        }
    }
}

impl GenerationConfig {
    /// Set the generation seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the probability thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: ProbabilityThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set explicit spawn sites.
    #[must_use]
    pub fn with_spawn_sites(mut self, sites: Vec<SpawnSite>) -> Self {
        self.spawn_sites = sites;
        self
    }

    /// Maximum elite-tier cells permitted per map.
    #[must_use]
    pub const fn elite_ceiling(&self) -> u32 {
        self.max_asteroids_per_player * self.expected_players
    }

    /// Spawn sites effective for a grid of the given dimensions.
    ///
    /// When no sites are configured, the primary base sits at the grid
    /// center.
    #[must_use]
    pub fn spawn_sites_for(&self, width: u32, height: u32) -> Vec<SpawnSite> {
        if self.spawn_sites.is_empty() {
            vec![SpawnSite::new(width / 2, height / 2)]
        } else {
            self.spawn_sites.clone()
        }
    }

    /// Parse a config from RON document text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::TerragenError::ConfigParse`] on malformed
    /// documents. Threshold validity is checked later, by the classifier,
    /// so that invalid values are reported as `InvalidThresholdConfig`.
    pub fn from_ron(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }
}
