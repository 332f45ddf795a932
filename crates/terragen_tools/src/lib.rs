//! # Terragen Tools
//!
//! Command-line authoring tools:
//! - Batch map generation over a source directory
//! - Source and config validators

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod generate;
pub mod validate;
