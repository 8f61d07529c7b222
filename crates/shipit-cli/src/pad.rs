//! Blank-line padding around command output on stderr

use std::io::{self, Write};

/// Writes a blank line to stderr when created and again when dropped
pub struct Pad;

impl Pad {
    pub fn new() -> Self {
        pad();
        Pad
    }
}

impl Drop for Pad {
    fn drop(&mut self) {
        pad();
    }
}

fn pad() {
    // best effort, stderr may already be closed
    let _ = writeln!(io::stderr());
}
