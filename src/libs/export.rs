//! Record export to CSV or JSON.
//!
//! Rows carry the category name resolved at export time, so the file stays
//! readable after categories are renamed or deleted.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use daylog::libs::export::{ExportFormat, Exporter};
//!
//! let exporter = Exporter::new(ExportFormat::Csv, None);
//! // exporter.export(&records, &categories)?;
//! ```

use crate::db::categories::Category;
use crate::db::records::Record;
use crate::libs::formatter::{format_datetime, format_minutes};
use crate::libs::view::category_name;
use anyhow::Result;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Which records to export, relative to a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportRange {
    Day,
    Week,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub id: i64,
    /// Local start, `YYYY-MM-DD HH:MM`.
    pub start: String,
    pub minutes: i64,
    /// `HH:MM`.
    pub duration: String,
    pub category_id: Option<i64>,
    pub category: String,
    pub description: String,
    pub timestamp: i64,
}

impl ExportRecord {
    pub fn from_record(record: &Record, categories: &[Category]) -> Self {
        Self {
            id: record.id,
            start: format_datetime(record.timestamp),
            minutes: record.minutes,
            duration: format_minutes(record.minutes),
            category_id: record.category_id,
            category: category_name(record.category_id, categories),
            description: record.description.clone(),
            timestamp: record.timestamp,
        }
    }
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Without a path the file is named `daylog_export_<timestamp>.<ext>` in the working directory.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let default_name = format!("daylog_export_{}", Local::now().format("%Y%m%d_%H%M%S"));
        let output_path = output_path.unwrap_or_else(|| PathBuf::from(format!("{}.{}", default_name, format.extension())));
        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Writes the records oldest first and returns how many were written.
    pub fn export(&self, records: &[Record], categories: &[Category]) -> Result<usize> {
        let rows = rows(records, categories);
        let file = File::create(&self.output_path)?;
        match self.format {
            ExportFormat::Csv => write_csv(file, &rows)?,
            ExportFormat::Json => write_json(file, &rows)?,
        }
        Ok(rows.len())
    }
}

pub fn rows(records: &[Record], categories: &[Category]) -> Vec<ExportRecord> {
    let mut rows: Vec<ExportRecord> = records.iter().map(|record| ExportRecord::from_record(record, categories)).collect();
    rows.sort_by_key(|row| (row.timestamp, row.id));
    rows
}

pub fn write_csv<W: Write>(writer: W, rows: &[ExportRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(mut writer: W, rows: &[ExportRecord]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, category_id: Option<i64>, timestamp: i64) -> Record {
        Record {
            id,
            category_id,
            description: "Standup, daily".to_string(),
            minutes: 30,
            timestamp,
        }
    }

    #[test]
    fn csv_has_a_header_and_quotes_commas() {
        let categories = [Category {
            id: 1,
            name: "Work".to_string(),
            color_hex: Some("#3b82f6".to_string()),
            created_at: 0,
        }];
        let mut out = Vec::new();
        write_csv(&mut out, &rows(&[record(2, Some(1), 2_000), record(1, Some(5), 1_000)], &categories)).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "id,start,minutes,duration,category_id,category,description,timestamp");
        assert!(lines[1].starts_with("1,"));
        assert!(lines[1].contains("\"Standup, daily\""));
        assert!(lines[2].contains(",Work,"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn json_is_an_array_of_rows() {
        let mut out = Vec::new();
        write_json(&mut out, &rows(&[record(1, None, 0)], &[])).unwrap();
        let parsed: Vec<ExportRecord> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].duration, "00:30");
        assert_eq!(parsed[0].category_id, None);
    }
}
