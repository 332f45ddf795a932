//! Tile-map source document parser.
//!
//! Sources are JSON documents with named tile layers; each layer stores
//! its rows as lists of raw `u32` tile ids (0 = empty). Two layers are
//! required: a base `terrain` layer and a `resources` marker layer.
//! Parsing is a pure function of the document text - no file IO here.
//!
//! Unknown tile ids are *not* rejected at parse time; they pass through
//! for the classifier to flag.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerragenError};
use crate::grid::TileGrid;

/// Name of the required base terrain layer.
pub const TERRAIN_LAYER: &str = "terrain";

/// Name of the required resource-marker layer.
pub const RESOURCE_LAYER: &str = "resources";

/// A named tile layer in a source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileLayer {
    /// Layer name; the schema matches on it.
    pub name: String,
    /// Editor visibility flag; tolerated, ignored by the pipeline.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Tile ids, one list per row.
    pub rows: Vec<Vec<u32>>,
}

fn default_visible() -> bool {
    true
}

/// A whole tile-map source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileMapSource {
    /// Declared grid width.
    pub width: u32,
    /// Declared grid height.
    pub height: u32,
    /// Tile layers; the set must match the schema exactly.
    pub layers: Vec<TileLayer>,
}

impl TileMapSource {
    /// Find a layer by name.
    #[must_use]
    pub fn layer(&self, name: &str) -> Option<&TileLayer> {
        self.layers.iter().find(|l| l.name == name)
    }
}

/// Parse a source document, keeping its per-layer metadata.
///
/// # Errors
///
/// Returns [`TerragenError::MalformedSource`] when the document is not
/// valid JSON or its layer set does not match the schema (one terrain
/// layer, one resource-marker layer, nothing else).
pub fn parse_document(text: &str) -> Result<TileMapSource> {
    let source: TileMapSource =
        serde_json::from_str(text).map_err(|e| TerragenError::MalformedSource {
            layer: "document".to_string(),
            detail: e.to_string(),
        })?;

    for layer in &source.layers {
        if layer.name != TERRAIN_LAYER && layer.name != RESOURCE_LAYER {
            return Err(TerragenError::MalformedSource {
                layer: layer.name.clone(),
                detail: "layer is not part of the source schema".to_string(),
            });
        }
    }
    for name in [TERRAIN_LAYER, RESOURCE_LAYER] {
        if source.layers.iter().filter(|l| l.name == name).count() > 1 {
            return Err(TerragenError::MalformedSource {
                layer: name.to_string(),
                detail: "layer appears more than once".to_string(),
            });
        }
    }

    Ok(source)
}

/// Parse a source document into a validated-rectangular [`TileGrid`].
///
/// # Errors
///
/// Returns [`TerragenError::MalformedSource`] naming the offending layer
/// and row when the document is not valid JSON, the layer set does not
/// match the schema, or any row length disagrees with the declared
/// width.
pub fn parse_source(text: &str) -> Result<TileGrid> {
    let source = parse_document(text)?;

    let terrain = flatten_layer(&source, TERRAIN_LAYER)?;
    let markers = flatten_layer(&source, RESOURCE_LAYER)?;

    TileGrid::new(source.width, source.height, terrain, markers)
}

/// Flatten one named layer to row-major ids, checking rectangularity.
fn flatten_layer(source: &TileMapSource, name: &str) -> Result<Vec<u32>> {
    let layer = source
        .layer(name)
        .ok_or_else(|| TerragenError::MalformedSource {
            layer: name.to_string(),
            detail: "required layer is missing".to_string(),
        })?;

    if layer.rows.len() != source.height as usize {
        return Err(TerragenError::MalformedSource {
            layer: name.to_string(),
            detail: format!(
                "expected {} rows, found {}",
                source.height,
                layer.rows.len()
            ),
        });
    }

    let mut tiles = Vec::with_capacity((source.width as usize) * (source.height as usize));
    for (row_index, row) in layer.rows.iter().enumerate() {
        if row.len() != source.width as usize {
            return Err(TerragenError::MalformedSource {
                layer: name.to_string(),
                detail: format!(
                    "row {row_index} has length {}, expected {}",
                    row.len(),
                    source.width
                ),
            });
        }
        tiles.extend_from_slice(row);
    }

    Ok(tiles)
}
