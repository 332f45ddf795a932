//! Asteroid tier classification.
//!
//! Walks the grid row-major and assigns each candidate cell a tier from
//! one seeded probability draw. Reserved spawn footprints are classified
//! no-asteroid unconditionally and never consume a draw, so spawn edits
//! leave every other cell's classification untouched.

use tracing::warn;

use crate::config::SpawnSite;
use crate::error::Result;
use crate::grid::{Cell, TileGrid};
use crate::identity::MapIdentity;
use crate::rng::DrawSource;
use crate::thresholds::{ProbabilityThresholds, Tier};

/// Marker id that designates an asteroid candidate cell.
pub const CANDIDATE_MARKER: u32 = 1;

/// A fully classified (and later, assigned) grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedMap {
    identity: MapIdentity,
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl ClassifiedMap {
    /// Map identity this grid was classified for.
    #[must_use]
    pub const fn identity(&self) -> MapIdentity {
        self.identity
    }

    /// Grid width in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Cell at grid coordinates.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<&Cell> {
        if x < self.width && y < self.height {
            self.cells.get((y * self.width + x) as usize)
        } else {
            None
        }
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable view for the assigner.
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Count of cells classified into any tier.
    #[must_use]
    pub fn asteroid_count(&self) -> u32 {
        self.cells.iter().filter(|c| c.tier.is_some()).count() as u32
    }

    /// Count of cells classified into an elite tier.
    #[must_use]
    pub fn elite_count(&self) -> u32 {
        self.cells
            .iter()
            .filter(|c| c.tier.is_some_and(Tier::is_elite))
            .count() as u32
    }
}

/// Classify every cell of a grid.
///
/// Thresholds are validated before any cell is drawn; an invalid
/// configuration aborts generation with no partial output.
///
/// # Errors
///
/// Returns [`crate::error::TerragenError::InvalidThresholdConfig`] if the
/// thresholds fail validation.
pub fn classify(
    grid: &TileGrid,
    identity: MapIdentity,
    thresholds: &ProbabilityThresholds,
    draws: &dyn DrawSource,
    spawn_sites: &[SpawnSite],
) -> Result<ClassifiedMap> {
    thresholds.validate()?;

    let width = grid.width();
    let height = grid.height();
    let mut cells = Vec::with_capacity((width as usize) * (height as usize));

    for y in 0..height {
        for x in 0..width {
            let raw_tile_id = grid.terrain_at(x, y).unwrap_or(0);
            let marker = grid.marker_at(x, y).unwrap_or(0);
            let reserved = spawn_sites.iter().any(|s| s.covers(x, y));

            let tier = if reserved || marker == 0 {
                None
            } else if marker == CANDIDATE_MARKER {
                thresholds.tier_for_draw(draws.draw(x, y))
            } else {
                warn!(x, y, marker, "unknown resource marker, cell left empty");
                None
            };

            cells.push(Cell {
                x,
                y,
                raw_tile_id,
                tier,
                resource: None,
                reserve: 0,
            });
        }
    }

    Ok(ClassifiedMap {
        identity,
        width,
        height,
        cells,
    })
}
