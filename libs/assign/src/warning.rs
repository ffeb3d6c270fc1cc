//! Shortfall warnings.

use rota_id::PositionId;
use serde::{Deserialize, Serialize};

/// Language used when rendering warnings for an administrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    En,
    Ko,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ko => "ko",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "ko" => Ok(Self::Ko),
            other => Err(format!("unsupported locale '{other}' (expected en or ko)")),
        }
    }
}

/// A position filled below its minimum headcount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortfallWarning {
    pub position_id: PositionId,
    pub position_name: String,
    pub filled: u32,
    pub needed: u32,
}

impl ShortfallWarning {
    /// Number of people still missing.
    pub fn missing(&self) -> u32 {
        self.needed.saturating_sub(self.filled)
    }

    /// Render the administrator-facing message.
    pub fn render(&self, locale: Locale) -> String {
        match locale {
            Locale::En => format!(
                "{}: {}/{} assigned (minimum not met)",
                self.position_name, self.filled, self.needed
            ),
            Locale::Ko => format!(
                "{}: {}/{}명 배정 (최소 인원 미달)",
                self.position_name, self.filled, self.needed
            ),
        }
    }
}

impl std::fmt::Display for ShortfallWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(Locale::En))
    }
}
