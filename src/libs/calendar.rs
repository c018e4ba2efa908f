//! Local calendar arithmetic on epoch-millisecond timestamps.
//!
//! Day bounds follow the local time zone: a day runs from local midnight to
//! the last millisecond before the next local midnight, so DST days are 23 or
//! 25 hours long. Weeks start on Monday (ISO).

use chrono::{DateTime, Datelike, Days, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - TimeDelta::days(date.weekday().num_days_from_monday() as i64)
}

/// The seven dates of the week starting at `week_start`.
pub fn week_days(week_start: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|offset| week_start + TimeDelta::days(offset as i64))
}

/// Epoch milliseconds of the first instant of `date` in the local time zone.
pub fn local_midnight_millis(date: NaiveDate) -> i64 {
    local_timestamp(date, NaiveTime::MIN)
}

/// Epoch milliseconds of `time` on `date` in the local time zone.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant; times
/// inside a DST gap move forward to the first valid minute.
pub fn local_timestamp(date: NaiveDate, time: NaiveTime) -> i64 {
    let naive = date.and_time(time);
    resolve_local(naive).timestamp_millis()
}

fn resolve_local(naive: NaiveDateTime) -> DateTime<Local> {
    let mut candidate = naive;
    // A DST gap is at most a couple of hours wide.
    for _ in 0..=180 {
        match Local.from_local_datetime(&candidate) {
            LocalResult::Single(dt) => return dt,
            LocalResult::Ambiguous(earliest, _) => return earliest,
            LocalResult::None => candidate += TimeDelta::minutes(1),
        }
    }
    Local.from_utc_datetime(&naive)
}

/// Inclusive `[start, end]` millisecond bounds of a local day.
pub fn day_bounds(date: NaiveDate) -> (i64, i64) {
    let start = local_midnight_millis(date);
    let next = date.checked_add_days(Days::new(1)).map(local_midnight_millis).unwrap_or(i64::MAX);
    (start, next - 1)
}

/// Inclusive `[start, end]` millisecond bounds of the week starting at `week_start`.
pub fn week_bounds(week_start: NaiveDate) -> (i64, i64) {
    let start = local_midnight_millis(week_start);
    let next = week_start.checked_add_days(Days::new(7)).map(local_midnight_millis).unwrap_or(i64::MAX);
    (start, next - 1)
}

/// Converts epoch milliseconds to local time.
pub fn to_local(millis: i64) -> DateTime<Local> {
    match Local.timestamp_millis_opt(millis) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => DateTime::<Local>::from(DateTime::<Utc>::default()),
    }
}

/// Local date on which the given instant falls.
pub fn local_date(millis: i64) -> NaiveDate {
    to_local(millis).date_naive()
}
