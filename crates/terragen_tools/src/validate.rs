//! Source and config validation.
//!
//! Runs the same pipeline as generation but discards artifact bytes, so
//! authors can check a source directory (and a candidate config) without
//! touching the output tree.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use terragen_core::catalog::ResourceCatalog;
use terragen_core::pipeline::generate;

use crate::generate::{BatchOptions, BatchRunError, FileFailure};

/// Results of a validation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Source files checked.
    pub checked: usize,
    /// Files that failed validation.
    pub failures: Vec<FileFailure>,
}

impl ValidationSummary {
    /// Whether every source file validated cleanly.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Validate every source file in a directory without writing artifacts.
///
/// # Errors
///
/// Returns [`BatchRunError`] when the directory or config cannot be
/// loaded at all; per-file failures land in the summary.
pub fn validate_sources(
    source_dir: PathBuf,
    config_path: Option<PathBuf>,
    catalog: &ResourceCatalog,
) -> Result<ValidationSummary, BatchRunError> {
    let options = BatchOptions {
        source_dir,
        output_dir: PathBuf::new(),
        config_path,
        seed: None,
        parallel: 0,
    };
    let config = crate::generate::load_config(&options)?;
    let sources = crate::generate::list_sources(&options.source_dir)?;

    let mut failures = Vec::new();
    for path in &sources {
        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let result = match crate::generate::identity_for_file(&file) {
            Some(identity) => std::fs::read_to_string(path)
                .map_err(|e| format!("read failed: {e}"))
                .and_then(|text| {
                    generate(&text, identity, &config, catalog).map_err(|e| e.to_string())
                })
                .map(|_| ()),
            None => Err(format!("cannot resolve a map identity from filename '{file}'")),
        };

        if let Err(message) = result {
            warn!(file = %file, message = %message, "validation failed");
            failures.push(FileFailure { file, message });
        }
    }

    info!(
        checked = sources.len(),
        failed = failures.len(),
        "validation complete"
    );
    Ok(ValidationSummary {
        checked: sources.len(),
        failures,
    })
}
