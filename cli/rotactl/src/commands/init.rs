//! Init command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use rota_assign::{default_positions, RosterInput};
use tracing::debug;

use crate::error::CliError;
use crate::output::{print_single, print_success, OutputFormat};
use crate::request::{render_file, RosterRequest};

use super::CommandContext;

/// Write a roster request template with the default band positions.
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Where to write the template. `.toml` selects TOML.
    #[arg(long, short, value_name = "PATH", default_value = "roster.json")]
    output: PathBuf,

    /// Overwrite an existing file.
    #[arg(long)]
    force: bool,
}

impl InitCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        write_template(&self.output, self.force)?;

        match ctx.format {
            OutputFormat::Json => print_single(&serde_json::json!({
                "path": self.output.display().to_string(),
                "positions": default_positions().len(),
            })),
            OutputFormat::Table => {
                print_success(&format!("Wrote {}", self.output.display()));
            }
        }
        Ok(())
    }
}

fn template() -> RosterRequest {
    RosterRequest {
        roster: RosterInput {
            positions: default_positions(),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn write_template(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::AlreadyExists {
            path: path.to_path_buf(),
        }
        .into());
    }

    let contents = render_file(path, &template())?;
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write template to {}", path.display()))?;
    debug!(path = %path.display(), "Template written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::request::{lint, load_file};

    use super::*;

    #[test]
    fn template_round_trips_in_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["roster.json", "roster.toml"] {
            let path = dir.path().join(name);
            write_template(&path, false).unwrap();

            let loaded: RosterRequest = load_file(&path).unwrap();
            assert_eq!(loaded.roster.positions, default_positions());
        }
    }

    #[test]
    fn template_only_lacks_votes() {
        let checks: Vec<_> = lint(&template()).into_iter().map(|f| f.check).collect();
        assert!(checks.iter().all(|c| *c == "understaffed"));
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.json");
        std::fs::write(&path, "{}").unwrap();

        let err = write_template(&path, false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::AlreadyExists { .. })
        ));

        write_template(&path, true).unwrap();
        let loaded: RosterRequest = load_file(&path).unwrap();
        assert!(!loaded.roster.positions.is_empty());
    }
}
