//! Terminal tables.
//!
//! Table builders are separate from printing so the layout can be checked
//! without a terminal.

use crate::db::categories::Category;
use crate::db::records::Record;
use crate::libs::formatter::{format_bar, format_date, format_datetime, format_minutes, format_percent, format_time};
use crate::libs::stats::{WeekStats, UNCATEGORIZED};
use crate::libs::timeline::{overlapping, TimelineBlock, WeekGrid};
use std::collections::HashSet;
use anyhow::Result;
use prettytable::{row, Cell, Row, Table};

const BAR_WIDTH: usize = 20;

pub struct View {}

impl View {
    pub fn categories(categories: &[Category]) -> Result<()> {
        Self::categories_table(categories).printstd();
        Ok(())
    }

    pub fn categories_table(categories: &[Category]) -> Table {
        let mut table = Table::new();
        table.add_row(row!["ID", "NAME", "COLOR", "CREATED"]);
        for category in categories {
            table.add_row(row![
                category.id,
                category.name,
                category.color_hex.as_deref().unwrap_or("-"),
                format_datetime(category.created_at)
            ]);
        }
        table
    }

    pub fn records(records: &[Record], categories: &[Category]) -> Result<()> {
        Self::records_table(records, categories).printstd();
        Ok(())
    }

    pub fn records_table(records: &[Record], categories: &[Category]) -> Table {
        let mut table = Table::new();
        table.add_row(row!["ID", "START", "FINISH", "DURATION", "CATEGORY", "DESCRIPTION"]);
        for record in records {
            table.add_row(row![
                record.id,
                format_datetime(record.timestamp),
                format_time(record.end_timestamp()),
                format_minutes(record.minutes),
                category_name(record.category_id, categories),
                record.description
            ]);
        }
        table
    }

    /// Today's blocks in order with a `NOW` row at the current minute.
    /// Blocks that overlap another one are flagged.
    pub fn timeline(blocks: &[TimelineBlock], records: &[Record], categories: &[Category], now_minute: Option<i64>) -> Result<()> {
        Self::timeline_table(blocks, records, categories, now_minute).printstd();
        Ok(())
    }

    pub fn timeline_table(blocks: &[TimelineBlock], records: &[Record], categories: &[Category], now_minute: Option<i64>) -> Table {
        let mut table = Table::new();
        table.add_row(row!["FROM", "TO", "DURATION", "CATEGORY", "DESCRIPTION", ""]);

        let overlapped: HashSet<i64> = overlapping(blocks).into_iter().flat_map(|(a, b)| [a, b]).collect();
        let mut now_pending = now_minute;
        for block in blocks {
            if let Some(minute) = now_pending {
                if minute < block.start_minute {
                    table.add_row(row![format_minutes(minute), "NOW", "", "", "", ""]);
                    now_pending = None;
                }
            }

            let description = records
                .iter()
                .find(|record| record.id == block.record_id)
                .map(|record| record.description.as_str())
                .unwrap_or_default();
            let flag = if overlapped.contains(&block.record_id) { "overlap" } else { "" };
            let to = if block.continues_next_day {
                "24:00+".to_string()
            } else {
                format_minutes(block.end_minute)
            };
            table.add_row(row![
                format_minutes(block.start_minute),
                to,
                format_minutes(block.end_minute - block.start_minute),
                category_name(block.category_id, categories),
                description,
                flag
            ]);
        }
        if let Some(minute) = now_pending {
            table.add_row(row![format_minutes(minute), "NOW", "", "", "", ""]);
        }
        table
    }

    pub fn week(grid: &WeekGrid, categories: &[Category]) -> Result<()> {
        Self::week_table(grid, categories).printstd();
        Ok(())
    }

    /// One column per day, one row per record slot, totals at the bottom.
    pub fn week_table(grid: &WeekGrid, categories: &[Category]) -> Table {
        let mut table = Table::new();
        table.add_row(text_row(grid.days.iter().map(|column| format_date(column.date))));

        for row_index in 0..grid.max_rows() {
            let cells: Vec<String> = grid
                .days
                .iter()
                .map(|column| match column.records.get(row_index) {
                    Some(record) => format!(
                        "{} {} {}",
                        format_time(record.timestamp),
                        format_minutes(record.minutes),
                        category_name(record.category_id, categories)
                    ),
                    None => String::new(),
                })
                .collect();
            table.add_row(text_row(cells));
        }

        table.add_row(text_row(grid.days.iter().map(|column| format_minutes(column.total_minutes))));
        table
    }

    pub fn stats(stats: &WeekStats) -> Result<()> {
        Self::stats_table(stats).printstd();
        Self::days_table(stats).printstd();
        Ok(())
    }

    pub fn stats_table(stats: &WeekStats) -> Table {
        let mut table = Table::new();
        table.add_row(row!["CATEGORY", "RECORDS", "TIME", "SHARE", ""]);
        for share in &stats.categories {
            table.add_row(row![
                share.name,
                share.record_count,
                format_minutes(share.minutes),
                format_percent(share.share),
                format_bar(share.share, BAR_WIDTH)
            ]);
        }
        table.add_row(row!["TOTAL", stats.record_count, format_minutes(stats.total_minutes), "", ""]);
        table
    }

    pub fn days_table(stats: &WeekStats) -> Table {
        let mut table = Table::new();
        table.add_row(row!["DAY", "TIME", ""]);
        for day in &stats.days {
            let marker = if stats.busiest_day == Some(day.date) { "busiest" } else { "" };
            table.add_row(row![format_date(day.date), format_minutes(day.minutes), marker]);
        }
        table.add_row(row!["AVERAGE", format_minutes(stats.average_active_day_minutes()), ""]);
        table
    }
}

fn text_row<I: IntoIterator<Item = String>>(cells: I) -> Row {
    Row::new(cells.into_iter().map(|cell| Cell::new(&cell)).collect())
}

/// Name of the category, or a placeholder for records without one or with a deleted one.
pub fn category_name(category_id: Option<i64>, categories: &[Category]) -> String {
    category_id
        .and_then(|id| categories.iter().find(|category| category.id == id))
        .map(|category| category.name.clone())
        .unwrap_or_else(|| UNCATEGORIZED.to_string())
}
