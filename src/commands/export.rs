//! `daylog export`: write a day or a week of records to a file.

use super::date_or_today;
use crate::{
    libs::{
        export::{ExportFormat, ExportRange, Exporter},
        messages::Message,
    },
    msg_info, msg_success,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
    format: ExportFormat,
    #[arg(short, long, value_enum, default_value_t = ExportRange::Week)]
    range: ExportRange,
    /// Day inside the exported range (YYYY-MM-DD), today by default
    #[arg(short, long)]
    date: Option<NaiveDate>,
    /// Output file, `daylog_export_<timestamp>.<ext>` by default
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let mut tracker = super::open_tracker()?;
    let date = date_or_today(args.date);

    let records = match args.range {
        ExportRange::Day => tracker.today_records(date)?,
        ExportRange::Week => tracker.week_records(date)?,
    };
    if records.is_empty() {
        msg_info!(Message::NothingToExport);
        return Ok(());
    }

    let categories = tracker.categories()?;
    let exporter = Exporter::new(args.format, args.output);
    exporter.export(&records, &categories)?;
    msg_success!(Message::ExportCompleted(exporter.output_path().display().to_string()));
    Ok(())
}
