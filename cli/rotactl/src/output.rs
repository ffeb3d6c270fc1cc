//! Output formatting for CLI commands.

use std::collections::BTreeMap;
use std::str::FromStr;

use colored::Colorize;
use serde::Serialize;
use serde_json::{json, Value};
use tabled::{Table, Tabled};

const CLI_SCHEMA_VERSION: &str = "rota.cli.v1";

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}' (expected table or json)")),
        }
    }
}

/// Print rows in the requested format.
pub fn print_output<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) {
    let rendered = match format {
        OutputFormat::Json => format_json(rows, "[]"),
        OutputFormat::Table if rows.is_empty() => "No items found.".dimmed().to_string(),
        OutputFormat::Table => Table::new(rows).to_string(),
    };
    println!("{rendered}");
}

/// Print a single item as JSON, regardless of format.
pub fn print_single<T: Serialize>(data: &T) {
    println!("{}", format_json(data, "{}"));
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "Success:".green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "Info:".blue().bold(), message);
}

/// Print a warning to stderr so stdout stays parseable.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}

/// Wrap `data` in the versioned envelope and render it with camelCase keys in
/// sorted order.
pub(crate) fn format_json<T: Serialize + ?Sized>(data: &T, fallback: &str) -> String {
    let envelope = json!({
        "schemaVersion": CLI_SCHEMA_VERSION,
        "data": serde_json::to_value(data).unwrap_or_else(|_| json!({})),
    });
    serde_json::to_string_pretty(&normalize_keys(envelope))
        .unwrap_or_else(|_| fallback.to_string())
}

fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Array(items) => items.into_iter().map(normalize_keys).collect(),
        Value::Object(entries) => {
            let ordered: BTreeMap<String, Value> = entries
                .into_iter()
                .map(|(key, value)| (lower_camel(&key), normalize_keys(value)))
                .collect();
            ordered.into_iter().collect()
        }
        scalar => scalar,
    }
}

fn lower_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut raise = false;
    for c in key.chars() {
        match c {
            '_' => raise = true,
            c if raise => {
                out.push(c.to_ascii_uppercase());
                raise = false;
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_is_wrapped_sorted_and_camel_cased() {
        let data = serde_json::json!([
            { "user_id": "u1", "position_id": "pos-drum", "total_count": 3 }
        ]);

        let out = format_json(&data, "[]");

        assert_eq!(
            out,
            serde_json::to_string_pretty(&serde_json::json!({
                "data": [{ "positionId": "pos-drum", "totalCount": 3, "userId": "u1" }],
                "schemaVersion": "rota.cli.v1"
            }))
            .unwrap()
        );
        let data_at = out.find("\"data\"").unwrap();
        let schema_at = out.find("\"schemaVersion\"").unwrap();
        assert!(data_at < schema_at);
    }

    #[test]
    fn large_seeds_stay_numeric() {
        let out = format_json(&serde_json::json!({ "seed": u64::MAX }), "{}");
        assert!(out.contains(&u64::MAX.to_string()));
        assert!(!out.contains(&format!("\"{}\"", u64::MAX)));
    }

    #[test]
    fn nested_keys_are_renamed_and_ordered() {
        let out = format_json(
            &json!({ "warnings": [{ "position_name": "Drums", "filled": 0 }], "fully_staffed": false }),
            "{}",
        );
        let value: Value = serde_json::from_str(&out).unwrap();

        let keys: Vec<_> = value["data"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["fullyStaffed", "warnings"]);
        let warning = value["data"]["warnings"][0].as_object().unwrap();
        assert_eq!(warning.keys().collect::<Vec<_>>(), ["filled", "positionName"]);
    }

    #[test]
    fn keys_become_lower_camel() {
        assert_eq!(lower_camel("max_consecutive_weeks"), "maxConsecutiveWeeks");
        assert_eq!(lower_camel("seed"), "seed");
        assert_eq!(lower_camel("trailing_"), "trailing");
        assert_eq!(lower_camel("double__gap"), "doubleGap");
    }

    #[test]
    fn parse_format() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("table".parse::<OutputFormat>(), Ok(OutputFormat::Table));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
