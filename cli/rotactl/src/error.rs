//! Error handling and display for the CLI.

use std::path::PathBuf;

use colored::Colorize;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("{} already exists", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("max consecutive weeks must be between 1 and 10, got {value}")]
    ThresholdOutOfRange { value: u32 },

    #[error("{count} position(s) below minimum staffing")]
    Understaffed { count: usize },

    #[error("{count} finding(s) reported")]
    Findings { count: usize },
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        eprintln!("\n{}", format!("Hint: {}", hint(cli_err)).yellow());
    }
}

fn hint(err: &CliError) -> &'static str {
    match err {
        CliError::Read { .. } => "Check the path, or run `rota init` to create a template.",
        CliError::Parse { .. } => "Files ending in .toml are read as TOML; everything else as JSON.",
        CliError::AlreadyExists { .. } => "Pass --force to overwrite it.",
        CliError::ThresholdOutOfRange { .. } => {
            "Use a value from 1 to 10, or omit it for the default of 3."
        }
        CliError::Understaffed { .. } => "Drop --strict to accept a partial roster.",
        CliError::Findings { .. } => "Drop --deny-warnings to report without failing.",
    }
}
