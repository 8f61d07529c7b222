//! The seam between the build pipeline and whatever produces the archive

use crate::Result;
use std::io::Read;

/// A project that can be built and serialized into a zip archive
///
/// The pipeline calls `build` once and then `zip` once. It never inspects
/// what the source puts in the archive.
pub trait ArchiveSource {
    /// Single-pass stream of the complete archive bytes
    type Stream: Read;

    /// Run the project build
    fn build(&mut self) -> Result<()>;

    /// Produce the archive stream
    fn zip(&mut self) -> Result<Self::Stream>;
}

impl<S: ArchiveSource + ?Sized> ArchiveSource for &mut S {
    type Stream = S::Stream;

    fn build(&mut self) -> Result<()> {
        (**self).build()
    }

    fn zip(&mut self) -> Result<Self::Stream> {
        (**self).zip()
    }
}
