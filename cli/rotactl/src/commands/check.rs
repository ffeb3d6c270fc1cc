//! Check command.
//!
//! Offline lint of a roster request. Nothing is assigned.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::error::CliError;
use crate::output::{print_output, print_success, OutputFormat};
use crate::request::{lint, load_file, RosterRequest};

use super::CommandContext;

/// Lint a roster request.
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Roster request file (JSON, or TOML by extension).
    #[arg(long, short, value_name = "PATH")]
    input: PathBuf,

    /// Exit non-zero if anything is reported.
    #[arg(long)]
    deny_warnings: bool,
}

impl CheckCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let request: RosterRequest = load_file(&self.input)?;
        let findings = lint(&request);

        match ctx.format {
            OutputFormat::Table if findings.is_empty() => {
                print_success(&format!("{} looks good", self.input.display()));
            }
            format => print_output(&findings, format),
        }

        if self.deny_warnings && !findings.is_empty() {
            return Err(CliError::Findings {
                count: findings.len(),
            }
            .into());
        }

        Ok(())
    }
}
