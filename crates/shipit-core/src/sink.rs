//! Output destination for the archive bytes
//!
//! Archive bytes never go to an interactive terminal. When standard output
//! is a terminal the archive is written to `out.zip` in the working
//! directory instead; otherwise it goes to standard output so the command
//! composes with shell redirection and pipes.

use crate::{Error, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File created when standard output is a terminal
pub const OUTPUT_FILE: &str = "out.zip";

/// Where archive bytes end up
#[derive(Debug)]
pub enum Sink {
    /// A freshly created output file
    File { file: File, path: PathBuf },
    /// The process's standard output, locked and block buffered for the copy
    Stdout(BufWriter<io::StdoutLock<'static>>),
}

impl Sink {
    /// Path of the output file, if this sink is file-backed
    pub fn path(&self) -> Option<&Path> {
        match self {
            Sink::File { path, .. } => Some(path),
            Sink::Stdout(_) => None,
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::File { file, .. } => file.write(buf),
            Sink::Stdout(stdout) => stdout.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::File { file, .. } => file.flush(),
            Sink::Stdout(stdout) => stdout.flush(),
        }
    }
}

/// Opens the sink once the archive stream is ready
///
/// Selection is deferred until it is called, so no file exists before there
/// are bytes to put in it.
pub trait SinkSelector {
    /// The writer archive bytes are copied into
    type Sink: Write;

    /// Open the sink
    fn select(&mut self) -> Result<Self::Sink>;
}

impl<F, W> SinkSelector for F
where
    F: FnMut() -> Result<W>,
    W: Write,
{
    type Sink = W;

    fn select(&mut self) -> Result<W> {
        self()
    }
}

/// Picks between `out.zip` and standard output based on interactivity
#[derive(Debug, Clone)]
pub struct TerminalSelector {
    interactive: bool,
    path: PathBuf,
}

impl TerminalSelector {
    /// Selector writing `out.zip` in the working directory when `interactive`
    pub fn new(interactive: bool) -> Self {
        Self::with_path(interactive, OUTPUT_FILE)
    }

    /// Selector writing to `path` instead of `out.zip` when `interactive`
    pub fn with_path<P: Into<PathBuf>>(interactive: bool, path: P) -> Self {
        Self {
            interactive,
            path: path.into(),
        }
    }

    /// Whether this selector will create a file
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }
}

impl SinkSelector for TerminalSelector {
    type Sink = Sink;

    fn select(&mut self) -> Result<Sink> {
        if !self.interactive {
            debug!("Standard output is not a terminal, streaming archive to it");
            return Ok(Sink::Stdout(BufWriter::new(io::stdout().lock())));
        }

        let file = File::create(&self.path).map_err(Error::CreateSink)?;
        info!("Writing archive to {}", self.path.display());
        Ok(Sink::File {
            file,
            path: self.path.clone(),
        })
    }
}
