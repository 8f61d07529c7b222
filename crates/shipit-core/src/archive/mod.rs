//! Archive operations module

pub mod report;
pub mod source;
pub mod tee;

pub use report::{ReportEntry, ReportStyle, SizeReport};
pub use source::ArchiveSource;
pub use tee::TeeReader;
