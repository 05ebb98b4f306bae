use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "escalated-sanitize",
    about = "Strip stored-XSS payloads from HTML fragments"
)]
pub struct Cli {
    /// Files to sanitize; none or `-` reads stdin
    pub inputs: Vec<PathBuf>,

    /// Write the result here instead of stdout (single input only)
    #[arg(short, long, conflicts_with = "in_place")]
    pub output: Option<PathBuf>,

    /// Rewrite each input file with its sanitized content
    #[arg(long, default_value_t = false)]
    pub in_place: bool,

    /// Also unwrap elements outside the formatting allowlist
    #[arg(long, env = "ESCALATED_STRICT")]
    pub strict: bool,

    /// Write nothing; exit with status 1 if any input would change
    #[arg(long, conflicts_with_all = ["output", "in_place"])]
    pub check: bool,

    /// Print one JSON removal report per input on stderr
    #[arg(long, default_value_t = false)]
    pub report: bool,
}
