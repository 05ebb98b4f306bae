//! Input/output handling around the sanitizer

use std::fmt;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use escalated_sanitize::{HtmlSanitizer, Mode, SanitizeReport};
use serde::Serialize;

use crate::{Cli, CliError};

/// What a run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Inputs processed
    pub inputs: usize,
    /// Inputs whose sanitized form differs from the bytes read
    pub changed: usize,
}

enum Input<'a> {
    Stdin,
    File(&'a Path),
}

impl fmt::Display for Input<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Stdin => f.write_str("<stdin>"),
            Input::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Serialize)]
struct ReportLine<'a> {
    input: String,
    mode: Mode,
    changed: bool,
    #[serde(flatten)]
    report: &'a SanitizeReport,
}

/// Sanitize every input named on the command line
pub fn run<R: Read, W: Write, E: Write>(
    cli: &Cli,
    mut stdin: R,
    mut stdout: W,
    mut stderr: E,
) -> Result<Summary, CliError> {
    let inputs = collect_inputs(&cli.inputs);
    if cli.output.is_some() && inputs.len() != 1 {
        return Err(CliError::Usage("--output takes exactly one input"));
    }
    if cli.in_place && inputs.iter().any(|input| matches!(input, Input::Stdin)) {
        return Err(CliError::Usage("--in-place needs file inputs, not stdin"));
    }

    let sanitizer = if cli.strict {
        HtmlSanitizer::strict()
    } else {
        HtmlSanitizer::new()
    };
    let mut summary = Summary::default();

    for input in &inputs {
        let original = read_input(input, &mut stdin)?;
        let sanitized = sanitizer.sanitize_with_report(&original);
        let changed = sanitized.html != original;

        summary.inputs += 1;
        if changed {
            summary.changed += 1;
        }
        tracing::debug!(
            input = %input,
            changed,
            removed_elements = sanitized.report.removed_elements,
            removed_attributes = sanitized.report.removed_attributes,
            "sanitized input"
        );

        if cli.report {
            let line = ReportLine {
                input: input.to_string(),
                mode: sanitizer.mode(),
                changed,
                report: &sanitized.report,
            };
            serde_json::to_writer(&mut stderr, &line)?;
            writeln!(stderr).map_err(CliError::Stderr)?;
        }

        if cli.check {
            if changed {
                tracing::warn!(input = %input, "input is not sanitized");
            }
            continue;
        }

        match (input, &cli.output) {
            (_, Some(path)) => write_file(path, &sanitized.html)?,
            (Input::File(path), None) if cli.in_place => {
                if changed {
                    write_file(path, &sanitized.html)?;
                }
            }
            _ => stdout
                .write_all(sanitized.html.as_bytes())
                .map_err(CliError::Stdout)?,
        }
    }

    stdout.flush().map_err(CliError::Stdout)?;
    Ok(summary)
}

fn collect_inputs(paths: &[PathBuf]) -> Vec<Input<'_>> {
    if paths.is_empty() {
        return vec![Input::Stdin];
    }
    paths
        .iter()
        .map(|path| {
            if path.as_os_str() == "-" {
                Input::Stdin
            } else {
                Input::File(path)
            }
        })
        .collect()
}

fn read_input<R: Read>(input: &Input<'_>, stdin: &mut R) -> Result<String, CliError> {
    let read = match input {
        Input::Stdin => {
            let mut bytes = Vec::new();
            stdin.read_to_end(&mut bytes).map(|_| bytes)
        }
        Input::File(path) => fs::read(path),
    };
    let bytes = read.map_err(|source| CliError::Read {
        path: input.to_string(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| CliError::InvalidUtf8 {
        path: input.to_string(),
    })
}

fn write_file(path: &Path, html: &str) -> Result<(), CliError> {
    fs::write(path, html).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}
