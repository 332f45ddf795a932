//! Probability thresholds and the asteroid tier partition.
//!
//! Thresholds are cumulative cutoffs over `[0,100]`. A draw `r` in
//! `[0,100)` falls into the first tier whose cutoff is strictly greater
//! than `r`; a draw at or beyond the final cutoff yields no asteroid.
//! Because comparison is strict less-than, the cutoffs partition `[0,100)`
//! without overlap.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerragenError};

/// A discrete asteroid-resource classification rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// First common rank.
    Common1,
    /// Second common rank.
    Common2,
    /// Smallest elite rank.
    EliteMicro,
    /// Small elite rank.
    EliteSmall,
    /// Medium elite rank.
    EliteMedium,
    /// Largest elite rank.
    EliteLarge,
}

impl Tier {
    /// All tiers in ascending cutoff order.
    pub const ALL: [Self; 6] = [
        Self::Common1,
        Self::Common2,
        Self::EliteMicro,
        Self::EliteSmall,
        Self::EliteMedium,
        Self::EliteLarge,
    ];

    /// Rank index (0-based, ascending).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Common1 => 0,
            Self::Common2 => 1,
            Self::EliteMicro => 2,
            Self::EliteSmall => 3,
            Self::EliteMedium => 4,
            Self::EliteLarge => 5,
        }
    }

    /// Whether this is an elite rank (draws from the map's rare resource).
    #[must_use]
    pub const fn is_elite(self) -> bool {
        !matches!(self, Self::Common1 | Self::Common2)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Common1 => "common1",
            Self::Common2 => "common2",
            Self::EliteMicro => "elite_micro",
            Self::EliteSmall => "elite_small",
            Self::EliteMedium => "elite_medium",
            Self::EliteLarge => "elite_large",
        };
        f.write_str(name)
    }
}

/// Cumulative probability cutoffs for tier classification.
///
/// Invariants (checked by [`ProbabilityThresholds::validate`]): every
/// cutoff in `[0,100]`, non-decreasing in tier order, and the final
/// cutoff equal to 100 so the partition covers the full draw range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbabilityThresholds {
    /// Cutoff for the first common rank.
    pub common1: u8,
    /// Cutoff for the second common rank.
    pub common2: u8,
    /// Cutoff for the smallest elite rank.
    pub elite_micro: u8,
    /// Cutoff for the small elite rank.
    pub elite_small: u8,
    /// Cutoff for the medium elite rank.
    pub elite_medium: u8,
    /// Cutoff for the largest elite rank. Must equal 100.
    pub elite_large: u8,
}

impl Default for ProbabilityThresholds {
    fn default() -> Self {
        Self {
            common1: 35,
            common2: 50,
            elite_micro: 55,
            elite_small: 75,
            elite_medium: 90,
            elite_large: 100,
        }
    }
}

impl ProbabilityThresholds {
    /// Cutoffs in ascending tier order.
    #[must_use]
    pub const fn cutoffs(&self) -> [u8; 6] {
        [
            self.common1,
            self.common2,
            self.elite_micro,
            self.elite_small,
            self.elite_medium,
            self.elite_large,
        ]
    }

    /// Validate monotonicity and range.
    ///
    /// # Errors
    ///
    /// Returns [`TerragenError::InvalidThresholdConfig`] if any cutoff is
    /// out of `[0,100]`, the sequence decreases anywhere, or the final
    /// cutoff is not 100.
    pub fn validate(&self) -> Result<()> {
        let cutoffs = self.cutoffs();

        for (tier, cutoff) in Tier::ALL.iter().zip(cutoffs) {
            if cutoff > 100 {
                return Err(TerragenError::InvalidThresholdConfig(format!(
                    "cutoff for {tier} is {cutoff}, must be in [0,100]"
                )));
            }
        }

        for (pair, window) in Tier::ALL.windows(2).zip(cutoffs.windows(2)) {
            if window[1] < window[0] {
                return Err(TerragenError::InvalidThresholdConfig(format!(
                    "cutoff for {} ({}) is below cutoff for {} ({})",
                    pair[1], window[1], pair[0], window[0]
                )));
            }
        }

        if self.elite_large != 100 {
            return Err(TerragenError::InvalidThresholdConfig(format!(
                "final cutoff is {}, must be 100 for full coverage",
                self.elite_large
            )));
        }

        Ok(())
    }

    /// Classify a draw in `[0,100)` into a tier.
    ///
    /// Comparison is strict `r < cutoff`, so cutoff values themselves
    /// resolve to the next tier up. Draws at or above the final cutoff
    /// yield `None` (no asteroid).
    #[must_use]
    pub fn tier_for_draw(&self, r: u8) -> Option<Tier> {
        Tier::ALL
            .into_iter()
            .zip(self.cutoffs())
            .find(|&(_, cutoff)| r < cutoff)
            .map(|(tier, _)| tier)
    }
}
