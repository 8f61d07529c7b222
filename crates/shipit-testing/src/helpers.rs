//! Helper utilities for shipit testing

use std::cell::RefCell;
use std::io::{self, Write};
use std::path::Path;
use std::rc::Rc;
use walkdir::WalkDir;

/// A cloneable in-memory writer
///
/// Clones share one buffer, so a test can hand one clone to the code under
/// test and inspect the bytes through another.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Rc<RefCell<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything written so far
    pub fn contents(&self) -> Vec<u8> {
        self.inner.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Names of the breakdown lines in a rendered size report
///
/// Skips the leading blank separator line and drops the size column.
pub fn report_names(rendered: &str) -> Vec<String> {
    rendered
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            // number, unit, name
            parts.next()?;
            parts.next()?;
            let name: Vec<&str> = parts.collect();
            Some(name.join(" "))
        })
        .collect()
}

/// Relative paths of all regular files under `dir`, sorted
pub fn files_in(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            e.path()
                .strip_prefix(dir)
                .ok()
                .map(|p| p.to_string_lossy().replace('\\', "/"))
        })
        .collect();

    files.sort();
    files
}
