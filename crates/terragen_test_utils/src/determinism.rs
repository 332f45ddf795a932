//! Determinism testing utilities.
//!
//! Provides a harness for verifying that generation produces identical
//! output given identical inputs.
//!
//! # Testing Strategy
//!
//! Generated artifacts must be bit-identical across runs so golden-output
//! regression tests hold. Sources of non-determinism include:
//!
//! - **System randomness**: no `rand()` without explicit seeds. All draws
//!   come from injected seeded sources.
//!
//! - **HashMap iteration order**: Rust's default hasher is randomized.
//!   The pipeline walks grids row-major, never by map iteration.
//!
//! - **Thread scheduling**: batch generation fans out per file. Each
//!   file's pipeline must be independent of scheduling, which the
//!   parallel harness below exercises.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

use terragen_core::catalog::ResourceCatalog;
use terragen_core::config::GenerationConfig;
use terragen_core::identity::MapIdentity;
use terragen_core::pipeline::generate;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
}

impl DeterminismResult {
    /// Get all unique hashes (should be 1 for deterministic generation).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that generation was deterministic, with a detailed message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Generation is non-deterministic!\n\
                 Runs: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Run a producer multiple times and verify its output never varies.
///
/// # Example
///
/// ```ignore
/// use terragen_test_utils::determinism::verify_determinism;
///
/// let result = verify_determinism(5, || generate_my_artifact());
/// result.assert_deterministic();
/// ```
pub fn verify_determinism<T, F>(runs: usize, produce: F) -> DeterminismResult
where
    T: Hash,
    F: Fn() -> T,
{
    let hashes: Vec<u64> = (0..runs).map(|_| compute_hash(&produce())).collect();
    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);

    DeterminismResult {
        is_deterministic,
        hashes,
    }
}

/// Verify that two full generation runs emit byte-identical artifacts.
#[must_use]
pub fn verify_generation_determinism(
    source_text: &str,
    identity: MapIdentity,
    config: &GenerationConfig,
    catalog: &ResourceCatalog,
) -> bool {
    let a = generate(source_text, identity, config, catalog);
    let b = generate(source_text, identity, config, catalog);
    match (a, b) {
        (Ok(a), Ok(b)) => a.encoded == b.encoded,
        _ => false,
    }
}

/// Run N generations of the same source in parallel and compare bytes.
///
/// Catches non-determinism that only manifests under thread scheduling
/// variations; the pipeline must not care how many siblings run beside
/// it.
///
/// # Panics
///
/// Panics if a worker thread panics.
#[must_use]
pub fn run_parallel_generations(
    source_text: &str,
    identity: MapIdentity,
    config: &GenerationConfig,
    catalog: &ResourceCatalog,
    workers: usize,
) -> DeterminismResult {
    let hashes: Vec<u64> = thread::scope(|s| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                s.spawn(|| {
                    let out = generate(source_text, identity, config, catalog);
                    compute_hash(&out.map(|o| o.encoded).unwrap_or_default())
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    DeterminismResult {
        is_deterministic: hashes.windows(2).all(|w| w[0] == w[1]),
        hashes,
    }
}

/// Compute a simple hash for any hashable value.
pub fn compute_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Proptest strategies for pipeline testing.
///
/// These strategies generate random but reproducible inputs for
/// property-based testing of classification and encoding.
pub mod strategies {
    use proptest::prelude::*;
    use terragen_core::thresholds::ProbabilityThresholds;

    /// Generate valid probability thresholds: sorted cutoffs in `[0,100]`
    /// with the final cutoff pinned to 100.
    pub fn arb_thresholds() -> impl Strategy<Value = ProbabilityThresholds> {
        proptest::collection::vec(0u8..=100, 5).prop_map(|mut cutoffs| {
            cutoffs.sort_unstable();
            ProbabilityThresholds {
                common1: cutoffs[0],
                common2: cutoffs[1],
                elite_micro: cutoffs[2],
                elite_small: cutoffs[3],
                elite_medium: cutoffs[4],
                elite_large: 100,
            }
        })
    }

    /// Generate a draw value in the classifier's range `[0,100)`.
    pub fn arb_draw() -> impl Strategy<Value = u8> {
        0u8..100
    }

    /// Generate grid dimensions within the shipped world bounds.
    pub fn arb_dims() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=37, 1u32..=25)
    }

    /// Generate a generation seed.
    pub fn arb_seed() -> impl Strategy<Value = u64> {
        any::<u64>()
    }

    /// Generate marker rows for the given dimensions (0 or candidate).
    pub fn arb_marker_rows(width: u32, height: u32) -> impl Strategy<Value = Vec<Vec<u32>>> {
        proptest::collection::vec(
            proptest::collection::vec(0u32..=1, width as usize),
            height as usize,
        )
    }
}
