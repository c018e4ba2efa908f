//! Raw user input and its validation.
//!
//! Forms collect strings; this module turns them into store requests. The
//! store itself accepts anything, so this is the only place where a zero
//! duration or an empty category name is rejected.

use crate::db::categories::{CategoryUpdate, NewCategory};
use crate::db::records::NewRecord;
use crate::libs::calendar;
use crate::libs::timeline::MINUTES_PER_DAY;
use crate::libs::view_state::duration_minutes;
use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// Longest duration a single record may have.
pub const MAX_MINUTES: i64 = MINUTES_PER_DAY * 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{0}' is not a number of minutes")]
    InvalidMinutes(String),
    #[error("duration must be positive, got {0} minute(s)")]
    NonPositiveMinutes(i64),
    #[error("duration cannot exceed one week, got {0} minute(s)")]
    TooManyMinutes(i64),
    #[error("'{0}' is not a time of day (expected HH:MM)")]
    InvalidTime(String),
    #[error("'{0}' is not a date (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("either a duration or a finish time is required")]
    MissingDuration,
    #[error("category name cannot be empty")]
    EmptyName,
    #[error("'{0}' is not a color (expected #rrggbb)")]
    InvalidColor(String),
}

pub fn parse_minutes(value: &str) -> Result<i64, ValidationError> {
    let minutes: i64 = value.trim().parse().map_err(|_| ValidationError::InvalidMinutes(value.to_string()))?;
    check_minutes(minutes)
}

fn check_minutes(minutes: i64) -> Result<i64, ValidationError> {
    if minutes <= 0 {
        return Err(ValidationError::NonPositiveMinutes(minutes));
    }
    if minutes > MAX_MINUTES {
        return Err(ValidationError::TooManyMinutes(minutes));
    }
    Ok(minutes)
}

pub fn parse_time(value: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| ValidationError::InvalidTime(value.to_string()))
}

pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// Normalizes `#RRGGBB` / `rrggbb` to lowercase `#rrggbb`.
pub fn parse_color(value: &str) -> Result<String, ValidationError> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::InvalidColor(value.to_string()));
    }
    Ok(format!("#{}", hex.to_ascii_lowercase()))
}

/// Record form as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordInput {
    pub category_id: Option<i64>,
    pub description: String,
    pub date: NaiveDate,
    pub start: String,
    /// Duration in minutes; takes precedence over `finish`.
    pub minutes: Option<String>,
    /// Finish time of day, used when no duration is given.
    pub finish: Option<String>,
}

impl RecordInput {
    pub fn validate(&self) -> Result<NewRecord, ValidationError> {
        let start = parse_time(&self.start)?;
        let minutes = match (&self.minutes, &self.finish) {
            (Some(minutes), _) => parse_minutes(minutes)?,
            (None, Some(finish)) => check_minutes(duration_minutes(start, parse_time(finish)?))?,
            (None, None) => return Err(ValidationError::MissingDuration),
        };

        Ok(NewRecord {
            category_id: self.category_id,
            description: self.description.trim().to_string(),
            minutes,
            timestamp: calendar::local_timestamp(self.date, start),
        })
    }
}

/// Category form as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInput {
    pub name: String,
    pub color_hex: Option<String>,
}

impl CategoryInput {
    pub fn validate(&self) -> Result<NewCategory, ValidationError> {
        let name = validate_name(&self.name)?;
        let color_hex = self.color_hex.as_deref().map(parse_color).transpose()?;
        Ok(NewCategory { name, color_hex })
    }
}

/// Builds a category update from optional edits. `clear_color` wins over `color_hex`.
pub fn category_update(name: Option<&str>, color_hex: Option<&str>, clear_color: bool) -> Result<CategoryUpdate, ValidationError> {
    let mut update = CategoryUpdate::default();
    if let Some(name) = name {
        update.name = Some(validate_name(name)?);
    }
    if clear_color {
        update.color_hex = Some(None);
    } else if let Some(color_hex) = color_hex {
        update.color_hex = Some(Some(parse_color(color_hex)?));
    }
    Ok(update)
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name.to_string())
}
