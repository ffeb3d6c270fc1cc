//! Roster request files.
//!
//! A request bundles the snapshots one assignment run needs. Files ending in
//! `.toml` are parsed as TOML; everything else is parsed as JSON.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use rota_assign::{PastEvent, RosterInput};
use rota_id::EventId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::CliError;

/// One assignment run's input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterRequest {
    /// Event being rostered; excluded when deriving history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_consecutive_weeks: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    #[serde(flatten)]
    pub roster: RosterInput,
}

/// A file of past rosters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PastEventsFile {
    #[serde(default)]
    pub events: Vec<PastEvent>,
}

/// Read and parse a JSON or TOML file.
pub fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&contents, is_toml(path)).map_err(|message| {
        CliError::Parse {
            path: path.to_path_buf(),
            message,
        }
        .into()
    })
}

fn parse_str<T: DeserializeOwned>(contents: &str, toml: bool) -> Result<T, String> {
    if toml {
        toml::from_str(contents).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(contents).map_err(|e| e.to_string())
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

/// Serialize a value for writing to `path`, using the same format rules as loading.
pub fn render_file<T: Serialize>(path: &Path, value: &T) -> Result<String> {
    if is_toml(path) {
        toml::to_string_pretty(value).context("failed to render TOML")
    } else {
        serde_json::to_string_pretty(value)
            .map(|s| s + "\n")
            .context("failed to render JSON")
    }
}

/// Something in a request the engine will tolerate but an operator should know about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct Finding {
    #[tabled(rename = "Check")]
    pub check: &'static str,
    #[tabled(rename = "Subject")]
    pub subject: String,
    #[tabled(rename = "Detail")]
    pub detail: String,
}

impl Finding {
    fn new(check: &'static str, subject: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            check,
            subject: subject.into(),
            detail: detail.into(),
        }
    }
}

/// Lint a request. Findings come out in a stable order.
pub fn lint(request: &RosterRequest) -> Vec<Finding> {
    let roster = &request.roster;
    let mut findings = Vec::new();

    if roster.positions.is_empty() {
        findings.push(Finding::new(
            "no_positions",
            "request",
            "no positions defined; nothing will be assigned",
        ));
    }

    let mut position_ids = BTreeSet::new();
    for position in &roster.positions {
        if !position_ids.insert(&position.id) {
            findings.push(Finding::new(
                "duplicate_position",
                position.id.as_str(),
                "position defined more than once",
            ));
        }
        if position.max_required < position.min_required {
            findings.push(Finding::new(
                "max_below_min",
                position.id.as_str(),
                format!(
                    "max_required {} is below min_required {}; {} will be used",
                    position.max_required, position.min_required, position.min_required
                ),
            ));
        }
    }

    let mut voters = HashSet::new();
    let mut ballots = Vec::new();
    for vote in &roster.votes {
        if !voters.insert(&vote.user_id) {
            findings.push(Finding::new(
                "duplicate_vote",
                vote.user_id.as_str(),
                "voted more than once; only the first vote is used",
            ));
            continue;
        }
        ballots.push(vote);

        for position_id in &vote.eligible_positions {
            if !position_ids.contains(position_id) {
                findings.push(Finding::new(
                    "unknown_position",
                    vote.user_id.as_str(),
                    format!("eligible for unknown position '{position_id}'"),
                ));
            }
        }
    }

    for position in &roster.positions {
        let pool = ballots
            .iter()
            .filter(|v| v.is_candidate_for(&position.id))
            .count();
        if (pool as u64) < u64::from(position.min_required) {
            findings.push(Finding::new(
                "understaffed",
                position.id.as_str(),
                format!(
                    "at most {pool} available candidate(s) for min_required {}",
                    position.min_required
                ),
            ));
        }
    }

    let mut records: BTreeMap<&str, usize> = BTreeMap::new();
    for record in &roster.history {
        *records.entry(record.user_id.as_str()).or_insert(0) += 1;
    }
    for (user_id, count) in records {
        if count > 1 {
            findings.push(Finding::new(
                "duplicate_history",
                user_id,
                format!("{count} history records; only the last is used"),
            ));
        }
    }

    findings
}
