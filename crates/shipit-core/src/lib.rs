//! Shipit - build a project into a deployable zip archive
//!
//! This library provides the build pipeline behind `shipit build`: running
//! the project build, streaming its archive to a file or standard output,
//! and optionally reporting how much each file contributes to the archive.

pub mod archive;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod project;
pub mod sink;
pub mod stats;

pub use error::{Error, Result};

// Re-export commonly used types
pub use archive::{ArchiveSource, ReportEntry, ReportStyle, SizeReport, TeeReader};
pub use config::Config;
pub use pipeline::{BuildSummary, Pipeline};
pub use project::Project;
pub use sink::{Sink, SinkSelector, TerminalSelector, OUTPUT_FILE};
