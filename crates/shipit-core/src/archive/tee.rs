//! Single-pass stream duplication

use std::io::{self, Read, Write};

/// A reader that mirrors every byte it yields into a second writer
///
/// Bytes reach the mirror in read order, before they are returned to the
/// caller. A failed mirror write fails the read.
pub struct TeeReader<R, W> {
    inner: R,
    mirror: W,
}

impl<R: Read, W: Write> TeeReader<R, W> {
    /// Wrap `inner`, copying everything read from it into `mirror`
    pub fn new(inner: R, mirror: W) -> Self {
        Self { inner, mirror }
    }

    /// Get a reference to the mirror
    pub fn mirror(&self) -> &W {
        &self.mirror
    }

    /// Unwrap into the inner reader and the mirror
    pub fn into_parts(self) -> (R, W) {
        (self.inner, self.mirror)
    }
}

impl<R: Read, W: Write> Read for TeeReader<R, W> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.mirror.write_all(&buf[..n])?;
        Ok(n)
    }
}
