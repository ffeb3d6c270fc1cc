//! Config commands (saved defaults for assign).

use anyhow::Result;
use clap::{Args, Subcommand};
use rota_assign::{Locale, TeamSettings};
use serde::Serialize;

use crate::config::{check_settings, Config};
use crate::error::CliError;
use crate::output::{print_single, print_success, OutputFormat};

use super::CommandContext;

/// Show or change saved CLI defaults.
#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
enum ConfigSubcommand {
    /// Show the saved config.
    Show,

    /// Change saved defaults. Unset flags keep their current value.
    Set(SetArgs),
}

#[derive(Debug, Args)]
struct SetArgs {
    /// Consecutive events before the burnout penalty applies.
    #[arg(long)]
    max_consecutive_weeks: Option<u32>,

    /// Language for shortfall warnings (en or ko).
    #[arg(long)]
    locale: Option<Locale>,

    /// Default output format (table or json).
    #[arg(long = "default-format", value_name = "FORMAT")]
    default_format: Option<OutputFormat>,
}

#[derive(Debug, Serialize)]
struct ConfigView {
    path: String,
    max_consecutive_weeks: Option<u32>,
    locale: Option<Locale>,
    format: Option<String>,
}

impl ConfigCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            ConfigSubcommand::Show => show(ctx),
            ConfigSubcommand::Set(args) => set(ctx, args),
        }
    }
}

fn show(ctx: CommandContext) -> Result<()> {
    let view = ConfigView {
        path: ctx.config_path.display().to_string(),
        max_consecutive_weeks: ctx.config.max_consecutive_weeks,
        locale: ctx.config.locale,
        format: ctx.config.format.clone(),
    };

    match ctx.format {
        OutputFormat::Json => print_single(&view),
        OutputFormat::Table => {
            println!("path: {}", view.path);
            println!(
                "max_consecutive_weeks: {}",
                view.max_consecutive_weeks
                    .map(|w| w.to_string())
                    .unwrap_or_else(|| "-".into())
            );
            println!(
                "locale: {}",
                view.locale.map(|l| l.to_string()).unwrap_or_else(|| "-".into())
            );
            println!("format: {}", view.format.as_deref().unwrap_or("-"));
        }
    }

    Ok(())
}

fn apply(config: &mut Config, args: SetArgs) -> Result<(), CliError> {
    if let Some(weeks) = args.max_consecutive_weeks {
        check_settings(&TeamSettings::new(Some(weeks)))?;
        config.max_consecutive_weeks = Some(weeks);
    }
    if let Some(locale) = args.locale {
        config.locale = Some(locale);
    }
    if let Some(format) = args.default_format {
        config.format = Some(format.as_str().to_string());
    }
    Ok(())
}

fn set(mut ctx: CommandContext, args: SetArgs) -> Result<()> {
    apply(&mut ctx.config, args)?;
    ctx.config.save_to(&ctx.config_path)?;

    match ctx.format {
        OutputFormat::Json => print_single(&serde_json::json!({ "ok": true })),
        OutputFormat::Table => {
            print_success(&format!("Saved {}", ctx.config_path.display()));
        }
    }

    Ok(())
}
