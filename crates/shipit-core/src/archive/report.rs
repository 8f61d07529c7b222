//! Size breakdown of a built archive
//!
//! The report lists archive entries by uncompressed size, largest first.
//! The single largest entry is left out of the breakdown: in a packaged
//! project that slot is conventionally taken by the container entry rather
//! than a source file. The exclusion is positional. It is not a name match,
//! so when two entries tie for largest, whichever sorts first is the one
//! dropped.

use crate::{Error, Result};
use crossterm::style::{style, Stylize};
use indicatif::HumanBytes;
use std::io::{self, Cursor, Write};
use tracing::debug;
use zip::ZipArchive;

/// Minimum width of the size column
const SIZE_COLUMN_WIDTH: usize = 10;

/// One archive entry as seen by the size report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    /// Path within the archive
    pub name: String,
    /// Uncompressed size in bytes
    pub size: u64,
}

/// Presentation options for rendering a report
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportStyle {
    /// Colorize entry names
    pub color: bool,
}

/// Archive entries sorted by uncompressed size, descending
#[derive(Debug, Clone)]
pub struct SizeReport {
    entries: Vec<ReportEntry>,
}

impl SizeReport {
    /// Parse a complete in-memory zip archive
    ///
    /// Zip needs random access to its central directory, so this only works
    /// on the whole archive, never on a prefix of it.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::parse(bytes).map_err(Error::report)
    }

    fn parse(bytes: &[u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;

        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let file = archive.by_index_raw(i)?;
            entries.push(ReportEntry {
                name: file.name().to_string(),
                size: file.size(),
            });
        }

        debug!("Parsed {} entries from {} byte archive", entries.len(), bytes.len());
        Ok(Self::from_entries(entries))
    }

    /// Build a report from already collected entries
    pub fn from_entries(mut entries: Vec<ReportEntry>) -> Self {
        // stable: ties keep archive order
        entries.sort_by(|a, b| b.size.cmp(&a.size));
        Self { entries }
    }

    /// All entries, largest first
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// The entry left out of the breakdown, if any
    pub fn excluded(&self) -> Option<&ReportEntry> {
        self.entries.first()
    }

    /// Entries shown in the breakdown: everything but the single largest
    pub fn breakdown(&self) -> &[ReportEntry] {
        self.entries.get(1..).unwrap_or(&[])
    }

    /// Write the breakdown: a blank separator line, then one
    /// `size name` line per entry
    pub fn render<W: Write>(&self, out: &mut W, opts: ReportStyle) -> io::Result<()> {
        writeln!(out)?;

        for entry in self.breakdown() {
            let size = HumanBytes(entry.size).to_string();
            if opts.color {
                writeln!(
                    out,
                    "  {:>width$} {}",
                    size,
                    style(&entry.name).magenta(),
                    width = SIZE_COLUMN_WIDTH
                )?;
            } else {
                writeln!(out, "  {:>width$} {}", size, entry.name, width = SIZE_COLUMN_WIDTH)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, size: u64) -> ReportEntry {
        ReportEntry {
            name: name.to_string(),
            size,
        }
    }

    fn render_plain(report: &SizeReport) -> String {
        let mut out = Vec::new();
        report.render(&mut out, ReportStyle::default()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_sorted_descending() {
        let report = SizeReport::from_entries(vec![
            entry("a", 10),
            entry("b", 500),
            entry("c", 300),
        ]);
        let sizes: Vec<u64> = report.entries().iter().map(|e| e.size).collect();
        assert_eq!(sizes, vec![500, 300, 10]);
    }

    #[test]
    fn test_ties_keep_archive_order() {
        let report = SizeReport::from_entries(vec![
            entry("first", 300),
            entry("big", 500),
            entry("second", 300),
        ]);
        let names: Vec<&str> = report.breakdown().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_largest_is_excluded() {
        let report = SizeReport::from_entries(vec![
            entry("big", 500),
            entry("mid1", 300),
            entry("mid2", 300),
            entry("small", 10),
        ]);

        assert_eq!(report.excluded(), Some(&entry("big", 500)));
        assert_eq!(report.breakdown().len(), 3);
        assert!(report.breakdown().iter().all(|e| e.name != "big"));
    }

    #[test]
    fn test_tie_for_largest_drops_first_in_order() {
        let report = SizeReport::from_entries(vec![entry("x", 7), entry("y", 7)]);
        assert_eq!(report.excluded().unwrap().name, "x");
        assert_eq!(report.breakdown(), &[entry("y", 7)]);
    }

    #[test]
    fn test_empty_and_single_entry() {
        let empty = SizeReport::from_entries(Vec::new());
        assert!(empty.excluded().is_none());
        assert!(empty.breakdown().is_empty());
        assert_eq!(render_plain(&empty), "\n");

        let single = SizeReport::from_entries(vec![entry("only", 42)]);
        assert!(single.breakdown().is_empty());
        assert_eq!(render_plain(&single), "\n");
    }

    #[test]
    fn test_render_layout() {
        let report = SizeReport::from_entries(vec![
            entry("app.bin", 4096),
            entry("index.js", 1024),
            entry("README", 12),
        ]);

        let rendered = render_plain(&report);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines, vec!["", "    1.00 KiB index.js", "        12 B README"]);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let err = SizeReport::from_bytes(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, Error::Report(_)));
        assert!(err.to_string().starts_with("opening zip: "));
    }
}
