//! The `build` command

use crate::pad::Pad;
use anyhow::Result;
use crossterm::tty::IsTty;
use shipit_core::stats::{self, Event};
use shipit_core::{Error, Pipeline, Project, ReportStyle, TerminalSelector};
use std::io;
use std::path::Path;
use tracing::info;

/// Build the project in `project_dir` and write its archive
pub fn run(project_dir: &Path, size: bool) -> Result<()> {
    let _pad = Pad::new();

    let project = Project::open(project_dir).map_err(Error::init)?;

    stats::track(&Event::new("Build").with("size", size));

    let selector = TerminalSelector::new(io::stdout().is_tty());
    let style = ReportStyle {
        color: io::stderr().is_tty(),
    };

    let summary = Pipeline::new(project, selector)
        .size_report(size)
        .report_style(style)
        .run(&mut io::stderr())?;

    info!("Build complete ({} bytes)", summary.bytes_written);
    Ok(())
}
