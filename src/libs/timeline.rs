//! Layout math for the daily timeline and the weekly grid.
//!
//! The timeline is a vertical 24-hour axis: a record is placed at
//! `minutes since local midnight * scale` and is `minutes * scale` tall.
//! Blocks that run past midnight are clipped to the end of the day.

use crate::db::records::Record;
use crate::libs::calendar;
use chrono::{DateTime, NaiveDate, TimeZone};

pub const MINUTES_PER_DAY: i64 = 24 * 60;

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineBlock {
    pub record_id: i64,
    pub category_id: Option<i64>,
    /// Minute of the day the block starts at.
    pub start_minute: i64,
    /// Minute of the day the block ends at, at most [`MINUTES_PER_DAY`].
    pub end_minute: i64,
    pub top: f64,
    pub height: f64,
    pub continues_next_day: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    /// Units per minute on the vertical axis.
    pub scale: f64,
    /// Minimum block height so very short records stay visible.
    pub min_block_height: f64,
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            scale: 1.0,
            min_block_height: 12.0,
        }
    }
}

impl Timeline {
    pub fn new(scale: f64) -> Self {
        Self { scale, ..Self::default() }
    }

    /// Full height of the 24-hour axis.
    pub fn day_height(&self) -> f64 {
        MINUTES_PER_DAY as f64 * self.scale
    }

    /// Blocks for the records starting on `date`, earliest first.
    ///
    /// Records that start on another day are skipped.
    pub fn layout(&self, date: NaiveDate, records: &[Record]) -> Vec<TimelineBlock> {
        let (day_start, day_end) = calendar::day_bounds(date);
        let day_minutes = (day_end + 1 - day_start) / 60_000;

        let mut blocks: Vec<TimelineBlock> = records
            .iter()
            .filter(|record| record.timestamp >= day_start && record.timestamp <= day_end)
            .map(|record| {
                let start_minute = (record.timestamp - day_start) / 60_000;
                let unclipped_end = start_minute.saturating_add(record.minutes.max(0));
                let end_minute = unclipped_end.min(day_minutes);
                TimelineBlock {
                    record_id: record.id,
                    category_id: record.category_id,
                    start_minute,
                    end_minute,
                    top: start_minute as f64 * self.scale,
                    height: ((end_minute - start_minute) as f64 * self.scale).max(self.min_block_height),
                    continues_next_day: unclipped_end > day_minutes,
                }
            })
            .collect();
        blocks.sort_by_key(|block| (block.start_minute, block.record_id));
        blocks
    }

    /// Vertical position of the current-time line.
    pub fn now_offset<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> f64 {
        minute_of_day(now.timestamp_millis()) as f64 * self.scale
    }
}

/// Minutes since local midnight of the day `timestamp` falls on.
pub fn minute_of_day(timestamp: i64) -> i64 {
    let (day_start, _) = calendar::day_bounds(calendar::local_date(timestamp));
    (timestamp - day_start) / 60_000
}

/// Pairs of blocks that overlap in time; the caller decides how to render them.
pub fn overlapping(blocks: &[TimelineBlock]) -> Vec<(i64, i64)> {
    let mut pairs = Vec::new();
    for (i, a) in blocks.iter().enumerate() {
        for b in &blocks[i + 1..] {
            if a.start_minute < b.end_minute && b.start_minute < a.end_minute {
                pairs.push((a.record_id, b.record_id));
            }
        }
    }
    pairs
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    pub date: NaiveDate,
    /// Earliest first.
    pub records: Vec<Record>,
    pub total_minutes: i64,
}

/// Records of a week split into seven day columns, Monday first.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekGrid {
    pub week_start: NaiveDate,
    pub days: Vec<DayColumn>,
}

impl WeekGrid {
    pub fn build(date: NaiveDate, records: &[Record]) -> Self {
        let week_start = calendar::week_start(date);
        let mut days: Vec<DayColumn> = calendar::week_days(week_start)
            .into_iter()
            .map(|date| DayColumn {
                date,
                records: Vec::new(),
                total_minutes: 0,
            })
            .collect();

        for record in records {
            let date = calendar::local_date(record.timestamp);
            if let Some(column) = days.iter_mut().find(|column| column.date == date) {
                column.total_minutes = column.total_minutes.saturating_add(record.minutes);
                column.records.push(record.clone());
            }
        }
        for column in days.iter_mut() {
            column.records.sort_by_key(|record| (record.timestamp, record.id));
        }

        WeekGrid { week_start, days }
    }

    pub fn total_minutes(&self) -> i64 {
        self.days.iter().fold(0_i64, |total, column| total.saturating_add(column.total_minutes))
    }

    /// Most records in a single day; the height of the grid in rows.
    pub fn max_rows(&self) -> usize {
        self.days.iter().map(|column| column.records.len()).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn record(id: i64, date: NaiveDate, hour: u32, minute: u32, minutes: i64) -> Record {
        Record {
            id,
            category_id: None,
            description: String::new(),
            minutes,
            timestamp: calendar::local_timestamp(date, NaiveTime::from_hms_opt(hour, minute, 0).unwrap()),
        }
    }

    #[test]
    fn blocks_are_positioned_by_minute_of_day() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
        let timeline = Timeline::new(2.0);
        let blocks = timeline.layout(date, &[record(2, date, 10, 30, 60), record(1, date, 9, 0, 3)]);

        assert_eq!(blocks[0].record_id, 1);
        assert_eq!(blocks[0].top, 9.0 * 60.0 * 2.0);
        assert_eq!(blocks[0].height, 12.0);
        assert_eq!(blocks[1].start_minute, 630);
        assert_eq!(blocks[1].height, 120.0);
    }

    #[test]
    fn late_records_are_clipped_at_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
        let blocks = Timeline::default().layout(date, &[record(1, date, 23, 30, 90)]);
        assert_eq!(blocks[0].end_minute, MINUTES_PER_DAY);
        assert!(blocks[0].continues_next_day);
    }

    #[test]
    fn huge_durations_are_clipped_without_overflow() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
        let records = [record(1, date, 22, 0, i64::MAX), record(2, date, 23, 0, i64::MAX)];

        let blocks = Timeline::default().layout(date, &records);
        assert_eq!(blocks[0].end_minute, MINUTES_PER_DAY);
        assert!(blocks[0].continues_next_day);

        let grid = WeekGrid::build(date, &records);
        assert_eq!(grid.total_minutes(), i64::MAX);
    }

    #[test]
    fn now_line_follows_minute_of_day() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
        let noon = calendar::to_local(calendar::local_timestamp(date, NaiveTime::from_hms_opt(12, 0, 0).unwrap()));
        assert_eq!(Timeline::new(0.5).now_offset(&noon), 360.0);
    }

    #[test]
    fn overlaps_are_reported_once() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
        let blocks = Timeline::default().layout(date, &[record(1, date, 9, 0, 60), record(2, date, 9, 30, 15), record(3, date, 10, 0, 5)]);
        assert_eq!(overlapping(&blocks), vec![(1, 2)]);
    }

    #[test]
    fn week_grid_buckets_by_local_day() {
        let monday = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
        let wednesday = monday + chrono::TimeDelta::days(2);
        let grid = WeekGrid::build(wednesday, &[record(1, wednesday, 8, 0, 30), record(2, monday, 8, 0, 20), record(3, wednesday, 7, 0, 10)]);

        assert_eq!(grid.week_start, monday);
        assert_eq!(grid.days[0].total_minutes, 20);
        assert_eq!(grid.days[2].records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 1]);
        assert_eq!(grid.total_minutes(), 60);
        assert_eq!(grid.max_rows(), 2);
    }
}
