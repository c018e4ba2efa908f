//! Weekly statistics computed from a week's records.
//!
//! Records are attributed to the local day their start falls on. Records
//! without a category, or pointing at a deleted one, are grouped together
//! under [`UNCATEGORIZED`].

use crate::db::categories::Category;
use crate::db::records::Record;
use crate::libs::calendar;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    /// `None` for uncategorized and dangling records.
    pub category_id: Option<i64>,
    pub name: String,
    pub color_hex: Option<String>,
    pub minutes: i64,
    pub record_count: usize,
    /// Share of the week's total in percent.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekStats {
    pub week_start: NaiveDate,
    pub total_minutes: i64,
    pub record_count: usize,
    /// Monday through Sunday.
    pub days: Vec<DayTotal>,
    /// Sorted by minutes, largest first.
    pub categories: Vec<CategoryShare>,
    /// Day with the most logged minutes; the earliest one wins ties.
    pub busiest_day: Option<NaiveDate>,
}

impl WeekStats {
    /// Aggregates `records` into the week starting at the Monday of `week_start`.
    ///
    /// Records outside that week are ignored.
    pub fn compute(week_start: NaiveDate, records: &[Record], categories: &[Category]) -> Self {
        let week_start = calendar::week_start(week_start);
        let week_days = calendar::week_days(week_start);
        let by_id: HashMap<i64, &Category> = categories.iter().map(|category| (category.id, category)).collect();

        let mut days: Vec<DayTotal> = week_days.iter().map(|&date| DayTotal { date, minutes: 0 }).collect();
        let mut shares: HashMap<Option<i64>, CategoryShare> = HashMap::new();
        let mut total_minutes: i64 = 0;
        let mut record_count = 0;

        for record in records {
            let date = calendar::local_date(record.timestamp);
            let Some(day) = days.iter_mut().find(|day| day.date == date) else {
                continue;
            };
            day.minutes = day.minutes.saturating_add(record.minutes);
            total_minutes = total_minutes.saturating_add(record.minutes);
            record_count += 1;

            let category = record.category_id.and_then(|id| by_id.get(&id).copied());
            let share = shares.entry(category.map(|c| c.id)).or_insert_with(|| CategoryShare {
                category_id: category.map(|c| c.id),
                name: category.map_or_else(|| UNCATEGORIZED.to_string(), |c| c.name.clone()),
                color_hex: category.and_then(|c| c.color_hex.clone()),
                minutes: 0,
                record_count: 0,
                share: 0.0,
            });
            share.minutes = share.minutes.saturating_add(record.minutes);
            share.record_count += 1;
        }

        let mut categories: Vec<CategoryShare> = shares
            .into_values()
            .map(|mut share| {
                share.share = if total_minutes > 0 { share.minutes as f64 * 100.0 / total_minutes as f64 } else { 0.0 };
                share
            })
            .collect();
        categories.sort_by(|a, b| b.minutes.cmp(&a.minutes).then_with(|| a.name.cmp(&b.name)));

        let busiest_day = days
            .iter()
            .filter(|day| day.minutes > 0)
            .fold(None::<&DayTotal>, |best, day| match best {
                Some(best) if best.minutes >= day.minutes => Some(best),
                _ => Some(day),
            })
            .map(|day| day.date);

        WeekStats {
            week_start,
            total_minutes,
            record_count,
            days,
            categories,
            busiest_day,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Average logged minutes per day that has at least one record.
    pub fn average_active_day_minutes(&self) -> i64 {
        let active_days = self.days.iter().filter(|day| day.minutes > 0).count() as i64;
        if active_days == 0 {
            0
        } else {
            self.total_minutes / active_days
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn at(date: NaiveDate, hour: u32) -> i64 {
        calendar::local_timestamp(date, NaiveTime::from_hms_opt(hour, 0, 0).unwrap())
    }

    fn record(id: i64, category_id: Option<i64>, minutes: i64, timestamp: i64) -> Record {
        Record {
            id,
            category_id,
            description: String::new(),
            minutes,
            timestamp,
        }
    }

    #[test]
    fn groups_dangling_and_missing_categories_together() {
        let monday = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
        let work = Category {
            id: 1,
            name: "Work".to_string(),
            color_hex: Some("#3b82f6".to_string()),
            created_at: 0,
        };
        let records = vec![
            record(1, Some(1), 90, at(monday, 9)),
            record(2, Some(42), 20, at(monday, 12)),
            record(3, None, 10, at(monday + chrono::TimeDelta::days(2), 8)),
        ];

        let stats = WeekStats::compute(monday, &records, &[work]);

        assert_eq!(stats.total_minutes, 120);
        assert_eq!(stats.categories.len(), 2);
        assert_eq!(stats.categories[0].name, "Work");
        assert_eq!(stats.categories[1].name, UNCATEGORIZED);
        assert_eq!(stats.categories[1].minutes, 30);
        assert_eq!(stats.busiest_day, Some(monday));
        assert_eq!(stats.days[2].minutes, 10);
    }

    #[test]
    fn totals_saturate_instead_of_overflowing() {
        let monday = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
        let records = vec![record(1, None, i64::MAX, at(monday, 9)), record(2, None, 60, at(monday, 11))];

        let stats = WeekStats::compute(monday, &records, &[]);
        assert_eq!(stats.total_minutes, i64::MAX);
        assert_eq!(stats.days[0].minutes, i64::MAX);
        assert_eq!(stats.categories[0].minutes, i64::MAX);
        assert_eq!(stats.record_count, 2);
    }

    #[test]
    fn ignores_records_outside_the_week() {
        let monday = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
        let next_monday = monday + chrono::TimeDelta::days(7);
        let stats = WeekStats::compute(monday, &[record(1, None, 30, at(next_monday, 9))], &[]);
        assert!(stats.is_empty());
        assert_eq!(stats.busiest_day, None);
    }
}
