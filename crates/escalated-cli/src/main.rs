//! escalated-sanitize - sanitize HTML from files or stdin
//!
//! Usage:
//!   escalated-sanitize reply.html > clean.html
//!   cat body.html | escalated-sanitize --strict
//!   escalated-sanitize --check --report drafts/*.html

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use escalated_cli::{Cli, run};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<ExitCode> {
    let filter = EnvFilter::try_from_env("ESCALATED_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let summary = run(&cli, io::stdin().lock(), io::stdout().lock(), io::stderr().lock())
        .context("sanitize failed")?;

    tracing::info!(inputs = summary.inputs, changed = summary.changed, "done");

    if cli.check && summary.changed > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
