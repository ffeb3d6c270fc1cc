//! CLI commands.

mod assign;
mod check;
mod config;
mod history;
mod init;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::output::OutputFormat;

/// rota - fair roster assignment for volunteer teams.
#[derive(Debug, Parser)]
#[command(name = "rota")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json). Defaults to the configured format.
    #[arg(long, global = true)]
    format: Option<OutputFormat>,

    /// Config file path. Defaults to the platform config directory.
    #[arg(long, global = true, env = "ROTA_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Assign people to positions for one event.
    Assign(assign::AssignCommand),

    /// Derive participation records from past rosters.
    History(history::HistoryCommand),

    /// Lint a roster request without assigning.
    Check(check::CheckCommand),

    /// Write a roster request template.
    Init(init::InitCommand),

    /// Show or change CLI defaults.
    Config(config::ConfigCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Run the CLI command.
    pub fn run(self) -> Result<()> {
        let Cli {
            format,
            config,
            command,
        } = self;
        // Only commands that need the config file read it.
        let ctx = move || CommandContext::load(config, format);

        match command {
            Commands::Assign(cmd) => cmd.run(ctx()?),
            Commands::History(cmd) => cmd.run(ctx()?),
            Commands::Check(cmd) => cmd.run(ctx()?),
            Commands::Init(cmd) => cmd.run(ctx()?),
            Commands::Config(cmd) => cmd.run(ctx()?),
            Commands::Version => {
                println!("rota {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub config: Config,
    pub config_path: PathBuf,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Load the config and settle the output format (flag, then config, then table).
    fn load(config_path: Option<PathBuf>, format: Option<OutputFormat>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path,
            None => crate::config::default_path()?,
        };
        let config = Config::load_from(&config_path)?;
        let format = format
            .or_else(|| config.output_format())
            .unwrap_or_default();

        Ok(Self {
            config,
            config_path,
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_assign_flags() {
        let cli = Cli::try_parse_from([
            "rota",
            "--format",
            "json",
            "assign",
            "--input",
            "roster.toml",
            "--seed",
            "42",
            "--locale",
            "ko",
            "--exclude-event",
            "evt-7",
            "--strict",
        ])
        .unwrap();

        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(matches!(cli.command, Commands::Assign(_)));
    }

    #[test]
    fn version_ignores_a_corrupt_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        let path = path.to_str().unwrap();

        let version = Cli::try_parse_from(["rota", "--config", path, "version"]).unwrap();
        assert!(version.run().is_ok());

        let history =
            Cli::try_parse_from(["rota", "--config", path, "history", "--events", "past.json"])
                .unwrap();
        let err = history.run().unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn format_falls_back_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"format": "json"}"#).unwrap();

        let ctx = CommandContext::load(Some(path.clone()), None).unwrap();
        assert_eq!(ctx.format, OutputFormat::Json);

        let ctx = CommandContext::load(Some(path), Some(OutputFormat::Table)).unwrap();
        assert_eq!(ctx.format, OutputFormat::Table);
    }

    #[test]
    fn rejects_invalid_ids_and_formats() {
        assert!(Cli::try_parse_from(["rota", "--format", "yaml", "version"]).is_err());
        assert!(Cli::try_parse_from([
            "rota",
            "history",
            "--events",
            "past.json",
            "--exclude-event",
            " padded"
        ])
        .is_err());
    }
}
