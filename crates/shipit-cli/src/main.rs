//! shipit-cli - Command-line interface for shipit
//!
//! Builds the project in the current directory and streams its deployable
//! zip archive to `out.zip` or, when redirected, to standard output.

use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::tty::IsTty;
use std::io;
use std::path::PathBuf;
use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod build;
mod pad;

const BUILD_EXAMPLES: &str = "\
Examples:
  Build archive and save to ./out.zip
  $ shipit build

  Build archive and output to file via stdout.
  $ shipit build > /tmp/out.zip

  Build archive list files by size.
  $ shipit build --size

  Build archive and list size without creating out.zip.
  $ shipit build --size > /dev/null";

/// shipit - Build a project into a deployable archive
#[derive(Parser)]
#[command(name = "shipit")]
#[command(author, version, about = "Build a project into a deployable archive", long_about = None)]
struct Cli {
    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Project directory
    #[arg(short = 'C', long, global = true, default_value = ".", env = "SHIPIT_DIR")]
    chdir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build zip file
    #[command(after_help = BUILD_EXAMPLES)]
    Build {
        /// Show zip contents size information
        #[arg(long)]
        size: bool,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout may carry archive bytes, so logs always go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(io::stderr().is_tty())
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let result = run();

    match result {
        Ok(_) => process::exit(0),
        Err(e) => {
            error!("Error: {}", e);

            let exit_code = map_error_to_exit_code(&e);
            process::exit(exit_code);
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Build { size } => build::run(&cli.chdir, size)?,
    }

    Ok(())
}

/// Map errors to exit codes:
/// - 0: Success
/// - 1: General error (init, build, report)
/// - 2: IO error (creating or writing the output)
/// - 3: Invalid configuration or path
/// - 4: Archive production failure
fn map_error_to_exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<shipit_core::Error>() {
        Some(core_err) => core_exit_code(core_err),
        None if err.is::<std::io::Error>() => 2,
        None => 1,
    }
}

fn core_exit_code(err: &shipit_core::Error) -> i32 {
    use shipit_core::Error;

    match err {
        Error::Init(inner) => match core_exit_code(inner) {
            3 => 3,
            _ => 1,
        },
        Error::Build(_) | Error::Hook { .. } | Error::Report(_) => 1,
        Error::CreateSink(_) | Error::Copy(_) | Error::Io(_) => 2,
        Error::Config(_) | Error::Pattern(_) | Error::InvalidPath(_) => 3,
        Error::Archive(_) | Error::Zip(_) => 4,
    }
}
