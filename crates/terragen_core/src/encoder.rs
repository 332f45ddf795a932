//! Binary encoding of classified maps.
//!
//! Layout: a fixed 6-byte header (format version, map identity id, width
//! and height as little-endian u16) followed by one [`RECORD_WIDTH`]-byte
//! record per cell in row-major order. A record holds the cell's resource
//! id, or [`EMPTY_RECORD`] for no asteroid. The encoder serializes
//! already-validated data only; it performs no classification.
//!
//! `decode(encode(m))` reproduces `m`'s resource layout exactly.

use crate::classifier::ClassifiedMap;
use crate::error::{Result, TerragenError};
use crate::identity::MapIdentity;

/// Artifact format version, bumped on any layout change.
pub const FORMAT_VERSION: u8 = 1;

/// Header length in bytes.
pub const HEADER_LEN: usize = 6;

/// Per-cell record width in bytes.
pub const RECORD_WIDTH: usize = 1;

/// Record value meaning "no asteroid" (the registry NULL slot).
pub const EMPTY_RECORD: u8 = 0;

/// A decoded artifact, for consumers and round-trip verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMap {
    /// Format version from the header.
    pub version: u8,
    /// Map identity from the header.
    pub identity: MapIdentity,
    /// Grid width.
    pub width: u32,
    /// Grid height.
    pub height: u32,
    /// One record per cell, row-major.
    pub records: Vec<u8>,
}

impl DecodedMap {
    /// Record at grid coordinates.
    #[must_use]
    pub fn record_at(&self, x: u32, y: u32) -> Option<u8> {
        if x < self.width && y < self.height {
            self.records.get((y * self.width + x) as usize).copied()
        } else {
            None
        }
    }
}

/// Expected total artifact length for the given dimensions.
#[must_use]
pub const fn encoded_len(width: u32, height: u32) -> usize {
    HEADER_LEN + (width as usize) * (height as usize) * RECORD_WIDTH
}

/// Encode a classified, assigned map into the artifact byte format.
///
/// # Errors
///
/// Returns [`TerragenError::EncodingIntegrityError`] if a dimension does
/// not fit the header's u16 fields.
pub fn encode(map: &ClassifiedMap) -> Result<Vec<u8>> {
    let width = u16::try_from(map.width()).map_err(|_| {
        TerragenError::EncodingIntegrityError(format!("width {} exceeds u16", map.width()))
    })?;
    let height = u16::try_from(map.height()).map_err(|_| {
        TerragenError::EncodingIntegrityError(format!("height {} exceeds u16", map.height()))
    })?;

    let mut bytes = Vec::with_capacity(encoded_len(map.width(), map.height()));
    bytes.push(FORMAT_VERSION);
    bytes.push(map.identity().id());
    bytes.extend_from_slice(&width.to_le_bytes());
    bytes.extend_from_slice(&height.to_le_bytes());

    for cell in map.cells() {
        bytes.push(cell.resource.map_or(EMPTY_RECORD, |r| r.get()));
    }

    Ok(bytes)
}

/// Decode an artifact back into header fields and records.
///
/// # Errors
///
/// Returns [`TerragenError::EncodingIntegrityError`] on a truncated
/// header, an unsupported version, an unknown map id, or a byte length
/// that disagrees with the header dimensions.
pub fn decode(bytes: &[u8]) -> Result<DecodedMap> {
    if bytes.len() < HEADER_LEN {
        return Err(TerragenError::EncodingIntegrityError(format!(
            "artifact is {} bytes, header alone is {HEADER_LEN}",
            bytes.len()
        )));
    }

    let version = bytes[0];
    if version != FORMAT_VERSION {
        return Err(TerragenError::EncodingIntegrityError(format!(
            "format version {version}, expected {FORMAT_VERSION}"
        )));
    }

    let identity = MapIdentity::from_id(bytes[1]).ok_or_else(|| {
        TerragenError::EncodingIntegrityError(format!("unknown map id {}", bytes[1]))
    })?;

    let width = u32::from(u16::from_le_bytes([bytes[2], bytes[3]]));
    let height = u32::from(u16::from_le_bytes([bytes[4], bytes[5]]));

    let expected = encoded_len(width, height);
    if bytes.len() != expected {
        return Err(TerragenError::EncodingIntegrityError(format!(
            "artifact is {} bytes, header dimensions require {expected}",
            bytes.len()
        )));
    }

    Ok(DecodedMap {
        version,
        identity,
        width,
        height,
        records: bytes[HEADER_LEN..].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{assign_resources, ResourceCatalog};
    use crate::classifier::{classify, CANDIDATE_MARKER};
    use crate::grid::TileGrid;
    use crate::rng::SeededDraw;
    use crate::thresholds::ProbabilityThresholds;

    fn classified(width: u32, height: u32, seed: u64) -> ClassifiedMap {
        let n = (width * height) as usize;
        let grid =
            TileGrid::new(width, height, vec![1; n], vec![CANDIDATE_MARKER; n]).unwrap();
        let mut map = classify(
            &grid,
            MapIdentity::Kimberlite,
            &ProbabilityThresholds::default(),
            &SeededDraw::new(MapIdentity::Kimberlite, seed),
            &[],
        )
        .unwrap();
        assign_resources(&mut map, &ResourceCatalog::shipped(), 100).unwrap();
        map
    }

    #[test]
    fn test_header_layout() {
        let map = classified(5, 4, 0);
        let bytes = encode(&map).unwrap();
        assert_eq!(bytes[0], FORMAT_VERSION);
        assert_eq!(bytes[1], MapIdentity::Kimberlite.id());
        assert_eq!(u16::from_le_bytes([bytes[2], bytes[3]]), 5);
        assert_eq!(u16::from_le_bytes([bytes[4], bytes[5]]), 4);
        assert_eq!(bytes.len(), encoded_len(5, 4));
    }

    #[test]
    fn test_round_trip_reproduces_layout() {
        let map = classified(9, 7, 42);
        let decoded = decode(&encode(&map).unwrap()).unwrap();

        assert_eq!(decoded.identity, map.identity());
        assert_eq!(decoded.width, map.width());
        assert_eq!(decoded.height, map.height());
        for cell in map.cells() {
            let expected = cell.resource.map_or(EMPTY_RECORD, |r| r.get());
            assert_eq!(decoded.record_at(cell.x, cell.y), Some(expected));
        }
    }

    #[test]
    fn test_encode_is_deterministic() {
        let a = encode(&classified(12, 9, 7)).unwrap();
        let b = encode(&classified(12, 9, 7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_decode_rejects_truncated_header() {
        let err = decode(&[FORMAT_VERSION, 1, 3]).unwrap_err();
        assert!(matches!(err, TerragenError::EncodingIntegrityError(_)));
    }

    #[test]
    fn test_decode_rejects_wrong_version() {
        let mut bytes = encode(&classified(2, 2, 0)).unwrap();
        bytes[0] = FORMAT_VERSION + 1;
        assert!(decode(&bytes).is_err());
    }

    #[test]
    fn test_decode_rejects_unknown_map_id() {
        let mut bytes = encode(&classified(2, 2, 0)).unwrap();
        bytes[1] = 0;
        assert!(decode(&bytes).is_err());
    }

    #[test]
    fn test_decode_rejects_length_mismatch() {
        let mut bytes = encode(&classified(3, 3, 0)).unwrap();
        bytes.pop();
        assert!(decode(&bytes).is_err());
        bytes.push(EMPTY_RECORD);
        bytes.push(EMPTY_RECORD);
        assert!(decode(&bytes).is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;
        use terragen_test_utils::determinism::strategies::{arb_dims, arb_seed};

        proptest! {
            /// The round-trip law holds for any in-bounds grid and seed.
            #[test]
            fn prop_round_trip((width, height) in arb_dims(), seed in arb_seed()) {
                let map = classified(width, height, seed);
                let decoded = decode(&encode(&map).unwrap()).unwrap();

                prop_assert_eq!(decoded.width, width);
                prop_assert_eq!(decoded.height, height);
                for cell in map.cells() {
                    let expected = cell.resource.map_or(EMPTY_RECORD, |r| r.get());
                    prop_assert_eq!(decoded.record_at(cell.x, cell.y), Some(expected));
                }
            }
        }
    }
}
