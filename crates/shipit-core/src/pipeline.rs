//! The build pipeline
//!
//! Steps run strictly in order: build the project, obtain the archive
//! stream, open the sink, copy the stream into it and, when a size report
//! is requested, report on a copy of the bytes taken during that same pass.

use crate::archive::{ArchiveSource, ReportStyle, SizeReport, TeeReader};
use crate::sink::SinkSelector;
use crate::{Error, Result};
use std::io::{self, Read, Write};
use tracing::{debug, info};

/// What a finished pipeline produced
#[derive(Debug)]
pub struct BuildSummary {
    /// Bytes copied into the sink
    pub bytes_written: u64,
    /// Bytes captured for the size report, if one was requested
    pub bytes_buffered: Option<u64>,
    /// The size report, if one was requested
    pub report: Option<SizeReport>,
}

/// Builds a project and streams its archive into a sink
pub struct Pipeline<S, K> {
    source: S,
    selector: K,
    size_report: bool,
    style: ReportStyle,
}

impl<S: ArchiveSource, K: SinkSelector> Pipeline<S, K> {
    /// Create a pipeline without size reporting
    pub fn new(source: S, selector: K) -> Self {
        Self {
            source,
            selector,
            size_report: false,
            style: ReportStyle::default(),
        }
    }

    /// Render a size breakdown after the archive is written
    pub fn size_report(mut self, enabled: bool) -> Self {
        self.size_report = enabled;
        self
    }

    /// Presentation of the size breakdown
    pub fn report_style(mut self, style: ReportStyle) -> Self {
        self.style = style;
        self
    }

    /// Run every step, writing the size breakdown (if any) to `report_out`
    ///
    /// The sink is only opened after the build and the archive stream both
    /// succeed, and it is closed before the report is produced.
    pub fn run<E: Write>(mut self, report_out: &mut E) -> Result<BuildSummary> {
        self.source.build().map_err(Error::build)?;
        debug!("Build finished, producing archive");

        let stream = self.source.zip().map_err(Error::archive)?;
        let mut sink = self.selector.select()?;

        let (bytes_written, buffer) = if self.size_report {
            let mut tee = TeeReader::new(stream, Vec::new());
            let written = copy_to_sink(&mut tee, &mut sink)?;
            let (_, buffer) = tee.into_parts();
            (written, Some(buffer))
        } else {
            let mut stream = stream;
            (copy_to_sink(&mut stream, &mut sink)?, None)
        };

        drop(sink);
        info!("Wrote {} byte archive", bytes_written);

        let bytes_buffered = buffer.as_ref().map(|b| b.len() as u64);
        let report = match buffer {
            Some(buffer) => {
                let report = SizeReport::from_bytes(&buffer)?;
                report.render(report_out, self.style)?;
                Some(report)
            }
            None => None,
        };

        Ok(BuildSummary {
            bytes_written,
            bytes_buffered,
            report,
        })
    }
}

fn copy_to_sink<R: Read, W: Write>(stream: &mut R, sink: &mut W) -> Result<u64> {
    let written = io::copy(stream, sink).map_err(Error::Copy)?;
    sink.flush().map_err(Error::Copy)?;
    Ok(written)
}
