//! CLI configuration.
//!
//! A small JSON file in the platform config directory (or wherever
//! `--config` points) holding defaults for the assign command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use rota_assign::{AssignPolicy, Locale, TeamSettings};
use serde::{Deserialize, Serialize};

use crate::error::CliError;
use crate::output::OutputFormat;

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

/// Env fallback for the burnout threshold.
pub const MAX_WEEKS_ENV: &str = "ROTA_MAX_CONSECUTIVE_WEEKS";

/// Default config file location.
pub fn default_path() -> Result<PathBuf> {
    ProjectDirs::from("org", "rota", "rota")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
}

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Burnout threshold used when neither the flag nor the request sets one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_consecutive_weeks: Option<u32>,

    /// Language for shortfall warnings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,

    /// Output format used when `--format` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Config {
    /// Load config from `path`, or return default if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Save config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let contents = serde_json::to_string_pretty(self)?;

        #[cfg(unix)]
        {
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;

            let mut file = fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(path)
                .with_context(|| format!("Failed to write config to {:?}", path))?;
            file.write_all(contents.as_bytes())?;
        }

        #[cfg(not(unix))]
        {
            fs::write(path, contents)
                .with_context(|| format!("Failed to write config to {:?}", path))?;
        }

        Ok(())
    }

    /// Configured output format, if valid.
    pub fn output_format(&self) -> Option<OutputFormat> {
        self.format.as_deref().and_then(|f| f.parse().ok())
    }
}

/// Reject thresholds a team could not have configured.
pub fn check_settings(settings: &TeamSettings) -> Result<(), CliError> {
    if settings.is_valid() {
        Ok(())
    } else {
        Err(CliError::ThresholdOutOfRange {
            value: settings.max_consecutive_weeks(),
        })
    }
}

/// Resolve the assignment policy.
///
/// Threshold precedence: flag, request file, config file,
/// `ROTA_MAX_CONSECUTIVE_WEEKS`, then the built-in default. An unparseable env
/// value is ignored.
pub fn resolve_policy(
    flag: Option<u32>,
    request: Option<u32>,
    config: &Config,
    env: Option<&str>,
) -> Result<AssignPolicy, CliError> {
    let settings = TeamSettings::new(
        flag.or(request)
            .or(config.max_consecutive_weeks)
            .or_else(|| env.and_then(|v| v.trim().parse().ok())),
    );
    check_settings(&settings)?;
    Ok(settings.policy())
}
