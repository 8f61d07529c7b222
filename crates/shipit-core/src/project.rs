//! A project directory as an archive source
//!
//! Building runs the configured hooks through the platform shell. Zipping
//! walks the project tree and writes every file that is not ignored into an
//! in-memory zip archive.

use crate::archive::ArchiveSource;
use crate::config::Config;
use crate::{Error, Result};
use glob::{MatchOptions, Pattern};
use std::fs::File;
use std::io::{self, Cursor, Seek, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// A project rooted at a directory, configured by its `shipit.toml`
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Open the project at `root`, loading its configuration
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::InvalidPath(root.to_path_buf()));
        }

        let config = Config::load(root)?;
        Ok(Self::with_config(root, config))
    }

    /// Use an already loaded configuration
    pub fn with_config<P: Into<PathBuf>>(root: P, config: Config) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Project configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Project name, from the config or else the directory name
    pub fn name(&self) -> String {
        if let Some(name) = &self.config.name {
            return name.clone();
        }

        self.root
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "project".to_string())
    }

    /// Run the build hooks in order, stopping at the first failure
    pub fn run_hooks(&self) -> Result<()> {
        for hook in &self.config.build.hooks {
            info!("Running hook: {}", hook);
            let status = shell(hook).current_dir(&self.root).status()?;

            if !status.success() {
                return Err(Error::Hook {
                    command: hook.clone(),
                    status: status.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Write the project's files into a zip archive
    pub fn write_zip<W: Write + Seek>(&self, writer: W) -> Result<W> {
        let ignore = self.ignore_patterns()?;
        let options = file_options(self.config.archive.compression_level);

        let mut zip = ZipWriter::new(writer);
        let mut count = 0usize;

        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.archive.follow_symlinks)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            let relative = match path.strip_prefix(&self.root) {
                Ok(rel) if !rel.as_os_str().is_empty() => archive_name(rel),
                _ => continue,
            };

            if is_ignored(&ignore, &relative) {
                debug!("Ignoring {}", relative);
                continue;
            }

            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }

            if file_type.is_symlink() {
                warn!("ZIP format does not support symlinks, skipping: {:?}", path);
                continue;
            }

            add_file(&mut zip, path, &relative, options)?;
            count += 1;
        }

        let writer = zip.finish()?;
        info!("Packed {} files from {:?}", count, self.root);
        Ok(writer)
    }

    fn ignore_patterns(&self) -> Result<Vec<Pattern>> {
        self.config
            .archive
            .ignore
            .iter()
            .map(|p| Pattern::new(p).map_err(Error::from))
            .collect()
    }
}

impl ArchiveSource for Project {
    type Stream = Cursor<Vec<u8>>;

    fn build(&mut self) -> Result<()> {
        info!("Building {}", self.name());
        self.run_hooks()
    }

    fn zip(&mut self) -> Result<Self::Stream> {
        let mut cursor = self.write_zip(Cursor::new(Vec::new()))?;
        cursor.rewind()?;
        Ok(cursor)
    }
}

/// Entry options for a configured level; deflate rejects level 0, so that
/// level stores entries uncompressed
fn file_options(level: i64) -> SimpleFileOptions {
    if level == 0 {
        return SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    }

    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(level))
}

/// Forward-slash archive path for a path relative to the project root
fn archive_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// A path is ignored when it, or any directory above it, matches a pattern
fn is_ignored(patterns: &[Pattern], name: &str) -> bool {
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let mut prefix = String::new();
    for part in name.split('/') {
        if !prefix.is_empty() {
            prefix.push('/');
        }
        prefix.push_str(part);

        if patterns.iter().any(|p| p.matches_with(&prefix, options)) {
            return true;
        }
    }

    false
}

fn add_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    path: &Path,
    name: &str,
    options: SimpleFileOptions,
) -> Result<()> {
    debug!("Adding file to ZIP: {:?} as {}", path, name);

    let mut file = File::open(path)?;

    #[cfg(unix)]
    let options = {
        use std::os::unix::fs::PermissionsExt;
        options.unix_permissions(file.metadata()?.permissions().mode())
    };

    zip.start_file(name, options)?;
    io::copy(&mut file, zip)?;
    Ok(())
}

#[cfg(unix)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}
