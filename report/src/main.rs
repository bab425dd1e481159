use std::{
    error::Error,
    io::{self, BufWriter, Write},
};

use clap::Parser;
use collision_report::{ReportOptions, Reporter};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    // Diagnostics go to stderr so that stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let options = ReportOptions::parse();

    let stdout = io::stdout();
    let mut reporter = Reporter::new(
        BufWriter::new(stdout.lock()),
        options.format,
        options.sweep(),
    )?;
    reporter.write_full_report()?;
    reporter.into_inner().flush()?;

    Ok(())
}
