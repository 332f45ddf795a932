//! Post-encode pipeline validation.
//!
//! Runs after the artifact bytes are assembled and before they are
//! accepted as output. Acceptance is all-or-nothing: any failed check
//! rejects the whole artifact, and no partial or degraded output is ever
//! emitted.

use crate::classifier::ClassifiedMap;
use crate::config::GenerationConfig;
use crate::encoder::{encoded_len, EMPTY_RECORD, HEADER_LEN};
use crate::error::{Result, TerragenError};

/// Validate an encoded artifact against the global invariants.
///
/// Checks, in order:
/// 1. total elite-tier cell count does not exceed the configured ceiling;
/// 2. no reserved spawn cell was encoded as non-empty;
/// 3. the byte length matches the header dimensions exactly.
///
/// # Errors
///
/// Returns the first violated invariant as a structured error.
pub fn validate_artifact(
    map: &ClassifiedMap,
    encoded: &[u8],
    config: &GenerationConfig,
) -> Result<()> {
    let elite_count = map.elite_count();
    let ceiling = config.elite_ceiling();
    if elite_count > ceiling {
        return Err(TerragenError::EliteCeilingExceeded {
            count: elite_count,
            ceiling,
        });
    }

    let width = map.width();
    let spawn_sites = config.spawn_sites_for(width, map.height());
    for site in &spawn_sites {
        for cell in map.cells().iter().filter(|c| site.covers(c.x, c.y)) {
            let record = encoded
                .get(HEADER_LEN + (cell.y * width + cell.x) as usize)
                .copied();
            if record != Some(EMPTY_RECORD) {
                return Err(TerragenError::SpawnCellOccupied {
                    x: cell.x,
                    y: cell.y,
                });
            }
        }
    }

    let expected = encoded_len(width, map.height());
    if encoded.len() != expected {
        return Err(TerragenError::EncodingIntegrityError(format!(
            "artifact is {} bytes, expected {expected}",
            encoded.len()
        )));
    }

    Ok(())
}
