//! Batch generation over a source directory.
//!
//! Each `.json` source file is an independent pipeline run; files fan
//! out over rayon with no shared mutable state. One file's failure never
//! touches another file's artifact, and the batch report records every
//! outcome for the downstream codegen layer to audit.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use terragen_core::catalog::ResourceCatalog;
use terragen_core::config::GenerationConfig;
use terragen_core::error::TerragenError;
use terragen_core::identity::MapIdentity;
use terragen_core::pipeline::{generate, GenerationStats};

/// Errors raised by the batch runner itself (not per-file outcomes).
#[derive(Debug, Error)]
pub enum BatchRunError {
    /// Failed to read a file or directory.
    #[error("Failed to read '{path}': {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The generation config file did not parse.
    #[error("Failed to load generation config '{path}': {source}")]
    Config {
        /// Path to the config file.
        path: String,
        /// Underlying parse error.
        #[source]
        source: TerragenError,
    },
}

/// Options for one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory of tile-map source documents.
    pub source_dir: PathBuf,
    /// Directory artifacts and the report are written into.
    pub output_dir: PathBuf,
    /// Optional RON generation config; defaults apply when absent.
    pub config_path: Option<PathBuf>,
    /// Optional seed override on top of the config.
    pub seed: Option<u64>,
    /// Maximum parallel files (0 = rayon default).
    pub parallel: u32,
}

/// Outcome for one successfully generated source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    /// Source file name.
    pub file: String,
    /// Resolved map identity.
    pub identity: MapIdentity,
    /// Artifact path, relative to the output directory.
    pub artifact: String,
    /// Artifact size in bytes.
    pub bytes_written: usize,
    /// Pipeline counters.
    pub stats: GenerationStats,
}

/// Outcome for a failed source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFailure {
    /// Source file name.
    pub file: String,
    /// What went wrong.
    pub message: String,
}

/// Results of a whole batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Successfully generated files.
    pub generated: Vec<FileOutcome>,
    /// Failed files.
    pub failures: Vec<FileFailure>,
    /// Wall-clock duration of the batch.
    pub duration_seconds: f64,
}

impl BatchReport {
    /// Whether every source file generated cleanly.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Save the report as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an IO error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

/// Resolve a source file's map identity from its leading tag character.
pub(crate) fn identity_for_file(file_name: &str) -> Option<MapIdentity> {
    file_name.chars().next().and_then(MapIdentity::from_tag)
}

/// List the `.json` source files in a directory, sorted by name.
///
/// Sorting keeps report ordering stable regardless of directory
/// enumeration order.
pub(crate) fn list_sources(dir: &Path) -> Result<Vec<PathBuf>, BatchRunError> {
    let entries = std::fs::read_dir(dir).map_err(|e| BatchRunError::Io {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}

/// Load the generation config, applying the seed override.
pub(crate) fn load_config(options: &BatchOptions) -> Result<GenerationConfig, BatchRunError> {
    let mut config = match &options.config_path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| BatchRunError::Io {
                path: path.display().to_string(),
                source: e,
            })?;
            GenerationConfig::from_ron(&text).map_err(|e| BatchRunError::Config {
                path: path.display().to_string(),
                source: e,
            })?
        }
        None => GenerationConfig::default(),
    };

    if let Some(seed) = options.seed {
        config.seed = seed;
    }
    Ok(config)
}

/// Generate one source file and write its artifact.
fn run_single_file(
    path: &Path,
    config: &GenerationConfig,
    catalog: &ResourceCatalog,
    output_dir: &Path,
) -> Result<FileOutcome, String> {
    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let identity = identity_for_file(&file)
        .ok_or_else(|| format!("cannot resolve a map identity from filename '{file}'"))?;

    let text = std::fs::read_to_string(path).map_err(|e| format!("read failed: {e}"))?;
    let output = generate(&text, identity, config, catalog).map_err(|e| e.to_string())?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let artifact = format!("{stem}.map.bin");
    std::fs::write(output_dir.join(&artifact), &output.encoded)
        .map_err(|e| format!("write failed: {e}"))?;

    debug!(file = %file, %identity, bytes = output.encoded.len(), "artifact written");
    Ok(FileOutcome {
        file,
        identity,
        artifact,
        bytes_written: output.encoded.len(),
        stats: output.stats,
    })
}

/// Run generation over every source file in the directory.
///
/// Per-file failures land in the report; only setup problems (unreadable
/// directory, bad config document) abort the batch itself.
///
/// # Errors
///
/// Returns [`BatchRunError`] when the batch cannot start at all.
pub fn run_batch(
    options: &BatchOptions,
    catalog: &ResourceCatalog,
) -> Result<BatchReport, BatchRunError> {
    let start = Instant::now();
    let config = load_config(options)?;
    let sources = list_sources(&options.source_dir)?;

    std::fs::create_dir_all(&options.output_dir).map_err(|e| BatchRunError::Io {
        path: options.output_dir.display().to_string(),
        source: e,
    })?;

    if options.parallel > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(options.parallel as usize)
            .build_global()
            .ok(); // Ignore if already set
    }

    info!(
        sources = sources.len(),
        source_dir = %options.source_dir.display(),
        "starting batch generation"
    );

    let results: Vec<Result<FileOutcome, FileFailure>> = sources
        .par_iter()
        .map(|path| {
            run_single_file(path, &config, catalog, &options.output_dir).map_err(|message| {
                let file = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                warn!(file = %file, message = %message, "generation failed");
                FileFailure { file, message }
            })
        })
        .collect();

    let (generated, failures): (Vec<_>, Vec<_>) =
        results.into_iter().partition(std::result::Result::is_ok);
    let generated: Vec<FileOutcome> = generated.into_iter().filter_map(Result::ok).collect();
    let failures: Vec<FileFailure> = failures.into_iter().filter_map(Result::err).collect();

    let report = BatchReport {
        generated,
        failures,
        duration_seconds: start.elapsed().as_secs_f64(),
    };

    info!(
        generated = report.generated.len(),
        failed = report.failures.len(),
        "batch complete"
    );
    Ok(report)
}
