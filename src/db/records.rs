//! Record storage.
//!
//! A record is one logged activity: a start timestamp, a duration in minutes
//! and an optional category. The store accepts any duration; rejecting
//! non-positive minutes is left to input validation
//! (see [`RecordInput`](crate::libs::input::RecordInput)).
//!
//! ## Usage
//!
//! ```rust
//! use daylog::db::db::Db;
//! use daylog::db::records::NewRecord;
//! use daylog::libs::calendar;
//! use chrono::Local;
//!
//! let now = Local::now().timestamp_millis();
//! let mut db = Db::open_in_memory()?;
//! db.init()?;
//! let id = db.records().insert(&NewRecord::new(None, "Standup", 15, now))?;
//! let today = db.records().fetch_today(calendar::local_date(now))?;
//! assert_eq!(today[0].id, id);
//! # Ok::<(), daylog::db::db::StoreError>(())
//! ```

use crate::db::db::{execute_update, StoreResult, UpdateOutcome};
use crate::libs::calendar;
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_RECORD: &str = "INSERT INTO records (category_id, description, minutes, timestamp) VALUES (?1, ?2, ?3, ?4)";
const SELECT_RECORDS_BY_RANGE: &str =
    "SELECT id, category_id, description, minutes, timestamp FROM records WHERE timestamp >= ?1 AND timestamp <= ?2 ORDER BY timestamp DESC, id DESC";
const SELECT_RECORD_BY_ID: &str = "SELECT id, category_id, description, minutes, timestamp FROM records WHERE id = ?1";
const COUNT_RECORDS_BY_CATEGORY: &str = "SELECT COUNT(*) FROM records WHERE category_id = ?1";
const DELETE_RECORD: &str = "DELETE FROM records WHERE id = ?1";

const MILLIS_PER_MINUTE: i64 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    /// May point at a category that no longer exists.
    pub category_id: Option<i64>,
    pub description: String,
    pub minutes: i64,
    /// Start of the activity in epoch milliseconds.
    pub timestamp: i64,
}

impl Record {
    /// End of the activity in epoch milliseconds.
    ///
    /// Saturates, since rows written outside of input validation may carry any duration.
    pub fn end_timestamp(&self) -> i64 {
        self.timestamp.saturating_add(self.minutes.saturating_mul(MILLIS_PER_MINUTE))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub category_id: Option<i64>,
    pub description: String,
    pub minutes: i64,
    pub timestamp: i64,
}

impl NewRecord {
    pub fn new(category_id: Option<i64>, description: &str, minutes: i64, timestamp: i64) -> Self {
        Self {
            category_id,
            description: description.to_string(),
            minutes,
            timestamp,
        }
    }
}

/// Partial update of a record.
///
/// Same convention as [`CategoryUpdate`](crate::db::categories::CategoryUpdate):
/// `None` leaves a column alone and `category_id: Some(None)` detaches the
/// record from its category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordUpdate {
    pub category_id: Option<Option<i64>>,
    pub description: Option<String>,
    pub minutes: Option<i64>,
    pub timestamp: Option<i64>,
}

impl RecordUpdate {
    pub fn category_id(mut self, category_id: Option<i64>) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn minutes(mut self, minutes: i64) -> Self {
        self.minutes = Some(minutes);
        self
    }

    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }

    pub fn changed_fields(&self) -> Vec<&'static str> {
        self.assignments().into_iter().map(|(column, _)| column).collect()
    }

    fn assignments(&self) -> Vec<(&'static str, Value)> {
        let mut assignments = Vec::new();
        if let Some(category_id) = self.category_id {
            assignments.push(("category_id", category_id.map_or(Value::Null, Value::Integer)));
        }
        if let Some(description) = &self.description {
            assignments.push(("description", Value::Text(description.clone())));
        }
        if let Some(minutes) = self.minutes {
            assignments.push(("minutes", Value::Integer(minutes)));
        }
        if let Some(timestamp) = self.timestamp {
            assignments.push(("timestamp", Value::Integer(timestamp)));
        }
        assignments
    }
}

pub struct Records<'a> {
    conn: &'a Connection,
}

impl<'a> Records<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn insert(&self, record: &NewRecord) -> StoreResult<i64> {
        self.conn
            .execute(INSERT_RECORD, params![record.category_id, record.description, record.minutes, record.timestamp])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Records starting within `[start, end]` (both inclusive), latest first.
    pub fn fetch_range(&self, start: i64, end: i64) -> StoreResult<Vec<Record>> {
        let mut stmt = self.conn.prepare(SELECT_RECORDS_BY_RANGE)?;
        let record_iter = stmt.query_map(params![start, end], Self::from_row)?;

        let mut records = Vec::new();
        for record in record_iter {
            records.push(record?);
        }
        Ok(records)
    }

    /// Records starting between local midnight of `date` and the next local midnight.
    pub fn fetch_today(&self, date: NaiveDate) -> StoreResult<Vec<Record>> {
        let (start, end) = calendar::day_bounds(date);
        self.fetch_range(start, end)
    }

    /// Records of the seven days starting at the Monday of `date`'s week.
    pub fn fetch_week(&self, date: NaiveDate) -> StoreResult<Vec<Record>> {
        let (start, end) = calendar::week_bounds(calendar::week_start(date));
        self.fetch_range(start, end)
    }

    pub fn get_by_id(&self, id: i64) -> StoreResult<Option<Record>> {
        Ok(self.conn.query_row(SELECT_RECORD_BY_ID, params![id], Self::from_row).optional()?)
    }

    /// Number of records pointing at `category_id`, whether or not it still exists.
    pub fn count_by_category(&self, category_id: i64) -> StoreResult<usize> {
        let count: i64 = self.conn.query_row(COUNT_RECORDS_BY_CATEGORY, params![category_id], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn update(&self, id: i64, update: &RecordUpdate) -> StoreResult<UpdateOutcome> {
        execute_update(self.conn, "records", id, update.assignments())
    }

    pub fn delete(&self, id: i64) -> StoreResult<usize> {
        Ok(self.conn.execute(DELETE_RECORD, params![id])?)
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Record> {
        Ok(Record {
            id: row.get(0)?,
            category_id: row.get(1)?,
            description: row.get(2)?,
            minutes: row.get(3)?,
            timestamp: row.get(4)?,
        })
    }
}
