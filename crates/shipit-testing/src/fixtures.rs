//! Common test fixtures for shipit testing

use crate::TestDir;
use anyhow::Result;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Creates a small web-app style project
///
/// `dist/bundle.js` is by far the largest file, followed by `index.html`.
pub fn create_project(test_dir: &TestDir) -> Result<()> {
    test_dir.create_file("index.html", "<html>".repeat(200).as_bytes())?;
    test_dir.create_file("dist/bundle.js", "x".repeat(64 * 1024).as_bytes())?;
    test_dir.create_file("src/app.js", b"console.log('hello')")?;
    test_dir.create_file("README.md", b"# Test Project")?;

    // empty directories add no entries
    test_dir.create_dir("public")?;

    // never packaged with the default config
    test_dir.create_file(".git/HEAD", b"ref: refs/heads/main\n")?;

    Ok(())
}

/// Writes a `shipit.toml` into the project
pub fn write_config(test_dir: &TestDir, contents: &str) -> Result<()> {
    test_dir.create_file("shipit.toml", contents.as_bytes())?;
    Ok(())
}

/// Builds an in-memory zip whose entries have the given uncompressed sizes
pub fn zip_with_sizes(entries: &[(&str, usize)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (name, size) in entries {
        zip.start_file(*name, options)?;
        zip.write_all(&vec![b'a'; *size])?;
    }

    Ok(zip.finish()?.into_inner())
}
