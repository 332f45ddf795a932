//! Source-document fixtures.
//!
//! Builders for the JSON tile-map documents the parser consumes, so
//! tests across crates construct identical inputs.

use terragen_core::tile_source::{TileLayer, TileMapSource, RESOURCE_LAYER, TERRAIN_LAYER};

/// Base terrain tile id used by fixtures.
pub const FIXTURE_TERRAIN_ID: u32 = 1;

/// Build a source document from explicit marker rows.
///
/// `marker_rows` is indexed `[y][x]`; terrain is filled uniformly with
/// [`FIXTURE_TERRAIN_ID`].
#[must_use]
pub fn source_document(width: u32, height: u32, marker_rows: Vec<Vec<u32>>) -> String {
    let terrain_rows = vec![vec![FIXTURE_TERRAIN_ID; width as usize]; height as usize];
    let source = TileMapSource {
        width,
        height,
        layers: vec![
            TileLayer {
                name: TERRAIN_LAYER.to_string(),
                visible: true,
                rows: terrain_rows,
            },
            TileLayer {
                name: RESOURCE_LAYER.to_string(),
                visible: true,
                rows: marker_rows,
            },
        ],
    };
    serde_json::to_string(&source).expect("fixture document serializes")
}

/// A document where every cell is an asteroid candidate.
#[must_use]
pub fn uniform_candidate_source(width: u32, height: u32) -> String {
    source_document(width, height, vec![vec![1; width as usize]; height as usize])
}

/// A document with no asteroid candidates at all.
#[must_use]
pub fn empty_candidate_source(width: u32, height: u32) -> String {
    source_document(width, height, vec![vec![0; width as usize]; height as usize])
}

/// A document with candidates only at the listed coordinates.
#[must_use]
pub fn source_with_candidates(width: u32, height: u32, candidates: &[(u32, u32)]) -> String {
    let mut rows = vec![vec![0u32; width as usize]; height as usize];
    for &(x, y) in candidates {
        rows[y as usize][x as usize] = 1;
    }
    source_document(width, height, rows)
}

/// The 9x7 all-candidate document used by the spawn-exclusion scenario.
#[must_use]
pub fn nine_by_seven_source() -> String {
    uniform_candidate_source(9, 7)
}

/// A document whose terrain layer has one short row (structurally bad).
#[must_use]
pub fn ragged_source() -> String {
    r#"{"width":3,"height":2,"layers":[
        {"name":"terrain","rows":[[1,1,1],[1,1]]},
        {"name":"resources","rows":[[0,0,0],[0,0,0]]}
    ]}"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use terragen_core::tile_source::parse_source;

    #[test]
    fn test_uniform_source_parses() {
        let grid = parse_source(&uniform_candidate_source(5, 4)).unwrap();
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.marker_at(4, 3), Some(1));
    }

    #[test]
    fn test_candidate_placement() {
        let grid = parse_source(&source_with_candidates(4, 4, &[(1, 2)])).unwrap();
        assert_eq!(grid.marker_at(1, 2), Some(1));
        assert_eq!(grid.marker_at(2, 1), Some(0));
    }

    #[test]
    fn test_ragged_source_fails_parse() {
        assert!(parse_source(&ragged_source()).is_err());
    }
}
