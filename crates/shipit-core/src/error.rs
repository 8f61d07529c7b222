//! Error types for shipit-core

use std::path::PathBuf;
use thiserror::Error;

/// Core error types for the shipit library
///
/// The phase variants (`Init`, `Build`, `Archive`, `CreateSink`, `Copy` and
/// `Report`) label which step of the build pipeline failed and carry the
/// underlying cause as their source.
#[derive(Error, Debug)]
pub enum Error {
    /// Project or configuration could not be loaded
    #[error("initializing: {0}")]
    Init(#[source] Box<Error>),

    /// The project build step failed
    #[error("building: {0}")]
    Build(#[source] Box<Error>),

    /// Producing the archive stream failed
    #[error("zip: {0}")]
    Archive(#[source] Box<Error>),

    /// The output file could not be created
    #[error("creating zip: {0}")]
    CreateSink(#[source] std::io::Error),

    /// Transferring archive bytes to the sink failed
    #[error("copying: {0}")]
    Copy(#[source] std::io::Error),

    /// The buffered archive could not be parsed for the size report
    #[error("opening zip: {0}")]
    Report(#[source] Box<Error>),

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration-related error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A build hook exited unsuccessfully
    #[error("hook `{command}` failed: {status}")]
    Hook { command: String, status: String },

    /// ZIP-specific error
    #[error("Zip error: {0}")]
    Zip(String),

    /// Invalid file or directory path
    #[error("Invalid path: {0}")]
    InvalidPath(PathBuf),

    /// Invalid ignore pattern
    #[error("Invalid pattern: {0}")]
    Pattern(String),
}

impl Error {
    /// Wrap an error as a failure of the build step
    pub fn build(err: Error) -> Self {
        Error::Build(Box::new(err))
    }

    /// Wrap an error as a failure to produce the archive stream
    pub fn archive(err: Error) -> Self {
        Error::Archive(Box::new(err))
    }

    /// Wrap an error as a failure to parse the buffered archive
    pub fn report(err: Error) -> Self {
        Error::Report(Box::new(err))
    }

    /// Wrap an error as a failure to load the project
    pub fn init(err: Error) -> Self {
        Error::Init(Box::new(err))
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Zip(err.to_string())
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::Io(err.into())
    }
}

impl From<glob::PatternError> for Error {
    fn from(err: glob::PatternError) -> Self {
        Error::Pattern(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
