//! Common assertions for shipit testing

use anyhow::Result;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Asserts that zip bytes contain exactly the given entry names, in any order
pub fn assert_zip_names(bytes: &[u8], expected: &[&str]) -> Result<()> {
    let archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut names: Vec<&str> = archive.file_names().collect();
    names.sort_unstable();

    let mut expected = expected.to_vec();
    expected.sort_unstable();

    assert_eq!(names, expected, "archive entries differ");
    Ok(())
}

/// Asserts that an entry of the zip decompresses to `content`
pub fn assert_zip_entry(bytes: &[u8], name: &str, content: &[u8]) -> Result<()> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut file = archive.by_name(name)?;

    let mut actual = Vec::new();
    file.read_to_end(&mut actual)?;

    assert_eq!(actual, content, "content mismatch for {}", name);
    Ok(())
}

/// Asserts that report lines (size column, then name) never grow in size
///
/// Sizes are compared by the byte counts they were rendered from, which the
/// caller supplies in line order.
pub fn assert_non_increasing(sizes: &[u64]) {
    for pair in sizes.windows(2) {
        assert!(
            pair[0] >= pair[1],
            "report not sorted descending: {} before {}",
            pair[0],
            pair[1]
        );
    }
}
