//! Tile grids, world bounds, and the bounds validator.
//!
//! A [`TileGrid`] is the parser's output: a rectangular, row-major view of
//! the two required source layers. It stays raw (tile ids only) until the
//! classifier turns it into cells.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerragenError};
use crate::thresholds::Tier;

/// Maximum grid dimensions for the world. Read-only to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapBounds {
    /// Maximum grid width.
    pub x_bounds: u32,
    /// Maximum grid height.
    pub y_bounds: u32,
}

impl Default for MapBounds {
    fn default() -> Self {
        // The shipped world range.
        Self {
            x_bounds: 37,
            y_bounds: 25,
        }
    }
}

/// Raw rectangular tile data for one source document.
///
/// Terrain and resource-marker ids are stored row-major. Rectangularity
/// is established by the parser; this type only upholds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    terrain: Vec<u32>,
    markers: Vec<u32>,
}

impl TileGrid {
    /// Assemble a grid from row-major layer data.
    ///
    /// # Errors
    ///
    /// Returns [`TerragenError::MalformedSource`] if either layer's length
    /// does not match `width * height`.
    pub fn new(width: u32, height: u32, terrain: Vec<u32>, markers: Vec<u32>) -> Result<Self> {
        let expected = (width as usize) * (height as usize);
        if terrain.len() != expected {
            return Err(TerragenError::MalformedSource {
                layer: "terrain".to_string(),
                detail: format!("expected {expected} tiles, found {}", terrain.len()),
            });
        }
        if markers.len() != expected {
            return Err(TerragenError::MalformedSource {
                layer: "resources".to_string(),
                detail: format!("expected {expected} tiles, found {}", markers.len()),
            });
        }
        Ok(Self {
            width,
            height,
            terrain,
            markers,
        })
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

    /// Whether the grid has no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    /// Terrain tile id at grid coordinates.
    #[must_use]
    pub fn terrain_at(&self, x: u32, y: u32) -> Option<u32> {
        self.index(x, y).map(|i| self.terrain[i])
    }

    /// Resource-marker tile id at grid coordinates.
    #[must_use]
    pub fn marker_at(&self, x: u32, y: u32) -> Option<u32> {
        self.index(x, y).map(|i| self.markers[i])
    }
}

/// A single grid cell as it moves through classification and assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Grid x coordinate.
    pub x: u32,
    /// Grid y coordinate.
    pub y: u32,
    /// Raw terrain tile id from the source document.
    pub raw_tile_id: u32,
    /// Classified tier, `None` for no asteroid.
    pub tier: Option<Tier>,
    /// Resolved resource, set by the assigner.
    pub resource: Option<crate::catalog::ResourceId>,
    /// Initial stocked reserve, set by the assigner.
    pub reserve: u64,
}

/// Check a grid against the configured world bounds.
///
/// Runs before any probability work. Terminal: a violation aborts
/// generation for the file.
///
/// # Errors
///
/// Returns [`TerragenError::BoundsViolation`] when the grid is empty or
/// exceeds the bounds in either dimension.
pub fn validate_bounds(grid: &TileGrid, bounds: MapBounds) -> Result<()> {
    if grid.is_empty() || grid.width() > bounds.x_bounds || grid.height() > bounds.y_bounds {
        return Err(TerragenError::BoundsViolation {
            width: grid.width(),
            height: grid.height(),
            x_bounds: bounds.x_bounds,
            y_bounds: bounds.y_bounds,
        });
    }
    Ok(())
}
