//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use wikiflat_domain::OutputRecord;
use wikiflat_store::properties_to_document;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format records output.
    pub fn format_records(&self, records: &[OutputRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_records_json(records),
            OutputFormat::Table => Ok(self.format_records_table(records)),
            OutputFormat::Quiet => Ok(self.format_records_quiet(records)),
        }
    }

    /// Format records as JSON, one object per record in stored column names.
    fn format_records_json(&self, records: &[OutputRecord]) -> Result<String> {
        let json_records: Vec<serde_json::Value> = records
            .iter()
            .map(|r| {
                serde_json::json!({
                    "wikipedia_id": r.title,
                    "title": r.label,
                    "wikidata_id": r.entity_id,
                    "description": r.description,
                    "properties": properties_to_document(&r.properties),
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&json_records)?)
    }

    /// Format records as a table.
    fn format_records_table(&self, records: &[OutputRecord]) -> String {
        if records.is_empty() {
            return self.colorize("No records found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Title", "ID", "Label", "Description", "Properties"]);

        for record in records {
            let count = record.properties.len().to_string();
            builder.push_record([
                record.title.as_str(),
                record.entity_id.as_str(),
                record.label.as_str(),
                record.description.as_deref().unwrap_or(""),
                count.as_str(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format records in quiet mode (titles only).
    fn format_records_quiet(&self, records: &[OutputRecord]) -> String {
        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        titles.join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use wikiflat_domain::{NormalizedValue, ReducedValue};

    fn create_test_record() -> OutputRecord {
        let mut properties = BTreeMap::new();
        properties.insert(
            "occupation".to_string(),
            ReducedValue::List(vec![
                NormalizedValue::Text("novelist".into()),
                NormalizedValue::Text("screenwriter".into()),
            ]),
        );
        OutputRecord {
            title: "Douglas Adams".to_string(),
            label: "Douglas Adams".to_string(),
            entity_id: "Q42".to_string(),
            description: Some("English writer".to_string()),
            properties,
        }
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_records(&[create_test_record()]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["wikidata_id"], "Q42");
        assert_eq!(parsed[0]["properties"]["occupation"][1], "screenwriter");
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_records(&[create_test_record()]).unwrap();
        assert_eq!(output, "Douglas Adams");
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_records(&[create_test_record()]).unwrap();
        assert!(output.contains("Title"));
        assert!(output.contains("Q42"));
    }

    #[test]
    fn test_empty_records() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_records(&[]).unwrap();
        assert!(output.contains("No records found"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("test"), "⚠ test");
    }
}
