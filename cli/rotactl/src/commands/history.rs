//! History command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rota_assign::{derive_participation, ParticipationRecord};
use rota_id::{EventId, UserId};
use serde::Serialize;
use tabled::Tabled;

use crate::output::print_output;
use crate::request::{load_file, PastEventsFile};

use super::CommandContext;

/// Derive participation records from past rosters.
#[derive(Debug, Args)]
pub struct HistoryCommand {
    /// Past rosters file (JSON, or TOML by extension).
    #[arg(long, value_name = "PATH")]
    events: PathBuf,

    /// Event to leave out, typically the one being rostered.
    #[arg(long, value_name = "ID")]
    exclude_event: Option<EventId>,
}

#[derive(Debug, Serialize, Tabled)]
struct RecordRow {
    #[tabled(rename = "Person")]
    user_id: UserId,
    #[tabled(rename = "Served")]
    total_count: u32,
    #[tabled(rename = "Streak")]
    last_consecutive_count: u32,
}

impl From<ParticipationRecord> for RecordRow {
    fn from(record: ParticipationRecord) -> Self {
        Self {
            user_id: record.user_id,
            total_count: record.total_count,
            last_consecutive_count: record.last_consecutive_count,
        }
    }
}

impl HistoryCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let past: PastEventsFile = load_file(&self.events)?;
        let rows: Vec<RecordRow> = derive_participation(&past.events, self.exclude_event.as_ref())
            .into_iter()
            .map(RecordRow::from)
            .collect();

        print_output(&rows, ctx.format);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn past_events_toml() {
        let past: PastEventsFile = toml::from_str(
            r#"
[[events]]
event_id = "evt-1"
date = "2026-03-01"
assignments = [{ position_id = "pos-drum", user_id = "u1" }]

[[events]]
event_id = "evt-2"
date = "2026-03-08"
assignments = [{ position_id = "pos-drum", user_id = "u1" }]
"#,
        )
        .unwrap();

        let rows: Vec<RecordRow> = derive_participation(&past.events, None)
            .into_iter()
            .map(RecordRow::from)
            .collect();

        assert_eq!(rows.len(), 1);
        assert_eq!((rows[0].total_count, rows[0].last_consecutive_count), (2, 2));
    }
}
