//! The assign command.
//!
//! Loads one roster request, optionally rebuilds participation history from
//! past rosters, runs the engine once and reports the result.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rota_assign::{
    derive_participation, AssignmentOutcome, Locale, ParticipationRecord, RngTieBreaker,
};
use rota_id::{EventId, PositionId, UserId};
use serde::Serialize;
use tabled::Tabled;
use tracing::{debug, info};

use crate::config::{resolve_policy, MAX_WEEKS_ENV};
use crate::error::CliError;
use crate::output::{print_info, print_output, print_single, print_warning, OutputFormat};
use crate::request::{load_file, PastEventsFile, RosterRequest};

use super::CommandContext;

/// Assign people to positions for one event.
#[derive(Debug, Args)]
pub struct AssignCommand {
    /// Roster request file (JSON, or TOML by extension).
    #[arg(long, short, value_name = "PATH")]
    input: PathBuf,

    /// Past rosters to derive participation history from.
    ///
    /// Replaces any `history` in the request.
    #[arg(long, value_name = "PATH")]
    past_events: Option<PathBuf>,

    /// Event to leave out of derived history. Defaults to the request's event_id.
    #[arg(long, value_name = "ID")]
    exclude_event: Option<EventId>,

    /// Seed for tie-breaking. A random seed is drawn and reported when absent.
    #[arg(long)]
    seed: Option<u64>,

    /// Consecutive events before the burnout penalty applies.
    #[arg(long)]
    max_consecutive_weeks: Option<u32>,

    /// Language for shortfall warnings (en or ko).
    #[arg(long)]
    locale: Option<Locale>,

    /// Exit non-zero if any position is below its minimum.
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct AssignmentRow {
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Person")]
    user_id: UserId,
    #[tabled(rename = "Served")]
    total_count: u32,
    #[tabled(rename = "Streak")]
    last_consecutive_count: u32,
}

#[derive(Debug, Serialize)]
struct WarningView {
    position_id: PositionId,
    position_name: String,
    filled: u32,
    needed: u32,
    message: String,
}

#[derive(Debug, Serialize)]
struct AssignReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    event_id: Option<EventId>,
    seed: u64,
    max_consecutive_weeks: u32,
    locale: Locale,
    fully_staffed: bool,
    assignments: Vec<rota_assign::Assignment>,
    warnings: Vec<WarningView>,
}

impl AssignCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let mut request: RosterRequest = load_file(&self.input)?;

        if let Some(path) = &self.past_events {
            let past: PastEventsFile = load_file(path)?;
            let exclude = self.exclude_event.as_ref().or(request.event_id.as_ref());
            if !request.roster.history.is_empty() {
                info!(
                    records = request.roster.history.len(),
                    "Replacing inline history with derived history"
                );
            }
            request.roster.history = derive_participation(&past.events, exclude);
        }

        let env_weeks = std::env::var(MAX_WEEKS_ENV).ok();
        let policy = resolve_policy(
            self.max_consecutive_weeks,
            request.max_consecutive_weeks,
            &ctx.config,
            env_weeks.as_deref(),
        )?;
        let max_weeks = policy.max_consecutive_weeks;
        let seed = self
            .seed
            .or(request.seed)
            .unwrap_or_else(rand::random::<u64>);
        let locale = self.locale.or(ctx.config.locale).unwrap_or_default();

        debug!(seed, max_weeks, %locale, "Running assignment");

        let mut tiebreak = RngTieBreaker::seeded(seed);
        let outcome = request.roster.assign(&policy, &mut tiebreak);

        match ctx.format {
            OutputFormat::Json => {
                let report = report(&request, &outcome, seed, max_weeks, locale);
                print_single(&report);
            }
            OutputFormat::Table => {
                let rows = rows(&request, &outcome);
                print_output(&rows, OutputFormat::Table);
                for message in outcome.warning_messages(locale) {
                    print_warning(&message);
                }
                print_info(&format!(
                    "seed {seed}, max consecutive weeks {max_weeks} (rerun with --seed {seed} to reproduce)"
                ));
            }
        }

        if self.strict && !outcome.warnings.is_empty() {
            return Err(CliError::Understaffed {
                count: outcome.warnings.len(),
            }
            .into());
        }

        Ok(())
    }
}

fn rows(request: &RosterRequest, outcome: &AssignmentOutcome) -> Vec<AssignmentRow> {
    let names: HashMap<&PositionId, &str> = request
        .roster
        .positions
        .iter()
        .map(|p| (&p.id, p.name.as_str()))
        .collect();
    // Later records for the same person replace earlier ones, as in the engine.
    let history: HashMap<&UserId, &ParticipationRecord> = request
        .roster
        .history
        .iter()
        .map(|r| (&r.user_id, r))
        .collect();

    outcome
        .assignments
        .iter()
        .map(|a| {
            let (total, streak) = history
                .get(&a.user_id)
                .map(|r| (r.total_count, r.last_consecutive_count))
                .unwrap_or((0, 0));
            AssignmentRow {
                position: names
                    .get(&a.position_id)
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| a.position_id.to_string()),
                user_id: a.user_id.clone(),
                total_count: total,
                last_consecutive_count: streak,
            }
        })
        .collect()
}

fn report(
    request: &RosterRequest,
    outcome: &AssignmentOutcome,
    seed: u64,
    max_consecutive_weeks: u32,
    locale: Locale,
) -> AssignReport {
    AssignReport {
        event_id: request.event_id.clone(),
        seed,
        max_consecutive_weeks,
        locale,
        fully_staffed: outcome.is_fully_staffed(),
        assignments: outcome.assignments.clone(),
        warnings: outcome
            .warnings
            .iter()
            .map(|w| WarningView {
                position_id: w.position_id.clone(),
                position_name: w.position_name.clone(),
                filled: w.filled,
                needed: w.needed,
                message: w.render(locale),
            })
            .collect(),
    }
}
