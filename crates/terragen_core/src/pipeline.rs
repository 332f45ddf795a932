//! Stage orchestration for one source document.
//!
//! Parse, bounds-check, classify, assign, encode, post-validate - in
//! that order, failing fast. Each source is processed independently; the
//! pipeline holds no state between documents, so batch callers may run
//! any number of them in parallel.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{assign_resources, ResourceCatalog};
use crate::classifier::classify;
use crate::config::GenerationConfig;
use crate::encoder::encode;
use crate::error::Result;
use crate::grid::validate_bounds;
use crate::identity::MapIdentity;
use crate::rng::{DrawSource, SeededDraw};
use crate::tile_source::parse_source;
use crate::validator::validate_artifact;

/// Summary counters for one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Grid width.
    pub width: u32,
    /// Grid height.
    pub height: u32,
    /// Cells classified into any tier.
    pub asteroid_cells: u32,
    /// Cells classified into an elite tier.
    pub elite_cells: u32,
}

/// The accepted output of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutput {
    /// Map identity the artifact was generated for.
    pub identity: MapIdentity,
    /// The encoded artifact bytes.
    pub encoded: Vec<u8>,
    /// Summary counters.
    pub stats: GenerationStats,
}

/// Run the full pipeline over one source document.
///
/// Deterministic: the same document, config, and catalog produce
/// byte-identical output on every run.
///
/// # Errors
///
/// Surfaces the first stage failure; see [`crate::error::TerragenError`]
/// for the taxonomy. No partial output is produced on error.
pub fn generate(
    source_text: &str,
    identity: MapIdentity,
    config: &GenerationConfig,
    catalog: &ResourceCatalog,
) -> Result<GenerationOutput> {
    let draws = SeededDraw::new(identity, config.seed);
    generate_with_draws(source_text, identity, config, catalog, &draws)
}

/// [`generate`] with an injected draw source.
///
/// The seam exists for tests that pin draws; production callers use
/// [`generate`], which derives the draw source from the config seed.
///
/// # Errors
///
/// As [`generate`].
pub fn generate_with_draws(
    source_text: &str,
    identity: MapIdentity,
    config: &GenerationConfig,
    catalog: &ResourceCatalog,
    draws: &dyn DrawSource,
) -> Result<GenerationOutput> {
    let grid = parse_source(source_text)?;
    validate_bounds(&grid, config.bounds)?;

    let spawn_sites = config.spawn_sites_for(grid.width(), grid.height());
    let mut map = classify(&grid, identity, &config.thresholds, draws, &spawn_sites)?;
    assign_resources(&mut map, catalog, config.base_reserve)?;

    let encoded = encode(&map)?;
    validate_artifact(&map, &encoded, config)?;

    let stats = GenerationStats {
        width: map.width(),
        height: map.height(),
        asteroid_cells: map.asteroid_count(),
        elite_cells: map.elite_count(),
    };
    debug!(
        %identity,
        width = stats.width,
        height = stats.height,
        asteroids = stats.asteroid_cells,
        elites = stats.elite_cells,
        "generation accepted"
    );

    Ok(GenerationOutput {
        identity,
        encoded,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{decode, EMPTY_RECORD};
    use crate::error::TerragenError;
    use crate::tile_source::{TileLayer, TileMapSource, RESOURCE_LAYER, TERRAIN_LAYER};

    fn source_doc(width: u32, height: u32) -> String {
        let rows = vec![vec![1u32; width as usize]; height as usize];
        serde_json::to_string(&TileMapSource {
            width,
            height,
            layers: vec![
                TileLayer {
                    name: TERRAIN_LAYER.to_string(),
                    visible: true,
                    rows: rows.clone(),
                },
                TileLayer {
                    name: RESOURCE_LAYER.to_string(),
                    visible: true,
                    rows,
                },
            ],
        })
        .unwrap()
    }

    #[test]
    fn test_full_pipeline_accepts_valid_source() {
        let config = GenerationConfig::default().with_seed(7);
        let out = generate(
            &source_doc(9, 7),
            MapIdentity::Kimberlite,
            &config,
            &ResourceCatalog::shipped(),
        )
        .unwrap();

        assert_eq!(out.stats.width, 9);
        assert_eq!(out.stats.height, 7);
        let decoded = decode(&out.encoded).unwrap();
        assert_eq!(decoded.identity, MapIdentity::Kimberlite);
    }

    #[test]
    fn test_two_runs_are_byte_identical() {
        let config = GenerationConfig::default().with_seed(12345);
        let catalog = ResourceCatalog::shipped();
        let doc = source_doc(20, 15);

        let a = generate(&doc, MapIdentity::Primary, &config, &catalog).unwrap();
        let b = generate(&doc, MapIdentity::Primary, &config, &catalog).unwrap();
        assert_eq!(a.encoded, b.encoded);
    }

    #[test]
    fn test_seed_changes_output() {
        let catalog = ResourceCatalog::shipped();
        let doc = source_doc(20, 15);

        let a = generate(
            &doc,
            MapIdentity::Primary,
            &GenerationConfig::default().with_seed(1),
            &catalog,
        )
        .unwrap();
        let b = generate(
            &doc,
            MapIdentity::Primary,
            &GenerationConfig::default().with_seed(2),
            &catalog,
        )
        .unwrap();
        assert_ne!(a.encoded, b.encoded);
    }

    #[test]
    fn test_spawn_block_is_empty_in_artifact() {
        let config = GenerationConfig::default();
        let out = generate(
            &source_doc(9, 7),
            MapIdentity::Primary,
            &config,
            &ResourceCatalog::shipped(),
        )
        .unwrap();

        let decoded = decode(&out.encoded).unwrap();
        for site in config.spawn_sites_for(9, 7) {
            for y in 0..7 {
                for x in 0..9 {
                    if site.covers(x, y) {
                        assert_eq!(decoded.record_at(x, y), Some(EMPTY_RECORD));
                    }
                }
            }
        }
    }

    #[test]
    fn test_oversize_grid_rejected_before_classification() {
        let config = GenerationConfig::default();
        let err = generate(
            &source_doc(38, 25),
            MapIdentity::Primary,
            &config,
            &ResourceCatalog::shipped(),
        )
        .unwrap_err();
        assert!(matches!(err, TerragenError::BoundsViolation { .. }));
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let config = GenerationConfig::default().with_thresholds(
            crate::thresholds::ProbabilityThresholds {
                common1: 60,
                common2: 50,
                ..Default::default()
            },
        );
        let err = generate(
            &source_doc(4, 4),
            MapIdentity::Primary,
            &config,
            &ResourceCatalog::shipped(),
        )
        .unwrap_err();
        assert!(matches!(err, TerragenError::InvalidThresholdConfig(_)));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let err = generate(
            &source_doc(9, 7),
            MapIdentity::Primary,
            &GenerationConfig::default(),
            &ResourceCatalog::new(),
        )
        .unwrap_err();
        assert!(matches!(err, TerragenError::UnmappedTier { .. }));
    }

    #[test]
    fn test_malformed_source_rejected() {
        let err = generate(
            "{]",
            MapIdentity::Primary,
            &GenerationConfig::default(),
            &ResourceCatalog::shipped(),
        )
        .unwrap_err();
        assert!(matches!(err, TerragenError::MalformedSource { .. }));
    }
}
