//! Escalated CLI
//!
//! Sanitizes HTML files or stdin from the command line. The binary is a thin
//! wrapper around [`run`], which takes its streams as arguments so it can be
//! driven in-process.

mod args;
mod run;

use std::path::PathBuf;

pub use args::Cli;
pub use run::{Summary, run};

/// Command-line error
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write to stdout: {0}")]
    Stdout(#[source] std::io::Error),

    #[error("Failed to write to stderr: {0}")]
    Stderr(#[source] std::io::Error),

    #[error("{path} is not valid UTF-8")]
    InvalidUtf8 { path: String },

    #[error("Failed to emit report: {0}")]
    Report(#[from] serde_json::Error),

    #[error("Invalid usage: {0}")]
    Usage(&'static str),
}
