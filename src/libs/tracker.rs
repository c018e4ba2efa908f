//! Cached query surface over the store.
//!
//! [`Tracker`] is what the command layer talks to: reads go through the
//! [`QueryCache`], mutations go straight to the store and, once they return
//! `Ok` (a no-op update included), invalidate every dependent query. There
//! are no optimistic updates and nothing is rolled back when a mutation
//! fails; the error is returned as is.
//!
//! ## Usage
//!
//! ```rust
//! use daylog::db::db::Db;
//! use daylog::db::records::NewRecord;
//! use daylog::libs::query::CachePolicies;
//! use daylog::libs::tracker::Tracker;
//! use daylog::libs::calendar;
//! use chrono::Local;
//!
//! let now = Local::now().timestamp_millis();
//! let mut db = Db::open_in_memory()?;
//! db.init()?;
//! let mut tracker = Tracker::new(db, CachePolicies::default());
//!
//! let categories = tracker.categories()?;
//! tracker.create_record(&NewRecord::new(Some(categories[0].id), "Run", 45, now))?;
//! assert_eq!(tracker.today_records(calendar::local_date(now))?.len(), 1);
//! # Ok::<(), daylog::db::db::StoreError>(())
//! ```

use crate::db::categories::{Category, CategoryUpdate, NewCategory};
use crate::db::db::{Db, StoreResult, UpdateOutcome};
use crate::db::records::{NewRecord, Record, RecordUpdate};
use crate::libs::calendar;
use crate::libs::clock::{Clock, SystemClock};
use crate::libs::messages::Message;
use crate::libs::query::{CachePolicies, Lookup, Namespace, QueryCache, QueryData, QueryKey};
use crate::libs::stats::WeekStats;
use crate::{msg_debug, msg_warning};
use chrono::NaiveDate;
use tracing::instrument;

pub struct Tracker<C: Clock = SystemClock> {
    db: Db,
    cache: QueryCache<C>,
}

impl Tracker<SystemClock> {
    pub fn new(db: Db, policies: CachePolicies) -> Self {
        Self::with_clock(db, policies, SystemClock)
    }
}

impl<C: Clock> Tracker<C> {
    pub fn with_clock(db: Db, policies: CachePolicies, clock: C) -> Self {
        Self {
            db,
            cache: QueryCache::new(policies, clock),
        }
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    pub fn cache(&self) -> &QueryCache<C> {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut QueryCache<C> {
        &mut self.cache
    }

    // --- queries ---

    pub fn categories(&mut self) -> StoreResult<Vec<Category>> {
        let data = self.query(QueryKey::Categories)?;
        Ok(data.into_categories().unwrap_or_default())
    }

    pub fn today_records(&mut self, date: NaiveDate) -> StoreResult<Vec<Record>> {
        let data = self.query(QueryKey::TodayRecords(date))?;
        Ok(data.into_records().unwrap_or_default())
    }

    /// Records of the week containing `date`, keyed by its Monday.
    pub fn week_records(&mut self, date: NaiveDate) -> StoreResult<Vec<Record>> {
        let data = self.query(QueryKey::WeekRecords(calendar::week_start(date)))?;
        Ok(data.into_records().unwrap_or_default())
    }

    pub fn week_stats(&mut self, date: NaiveDate) -> StoreResult<WeekStats> {
        let week_start = calendar::week_start(date);
        match self.query(QueryKey::WeekStats(week_start))?.into_week_stats() {
            Some(stats) => Ok(stats),
            None => Ok(WeekStats::compute(week_start, &[], &[])),
        }
    }

    fn query(&mut self, key: QueryKey) -> StoreResult<QueryData> {
        match self.cache.lookup(&key) {
            Lookup::Fresh(data) => Ok(data),
            Lookup::Stale(data) => {
                msg_debug!(format!("serving stale '{}' while a refresh is pending", key));
                Ok(data)
            }
            Lookup::Miss => {
                let data = self.fetch(&key)?;
                self.cache.store(key, data.clone());
                Ok(data)
            }
        }
    }

    fn fetch(&self, key: &QueryKey) -> StoreResult<QueryData> {
        msg_debug!(format!("fetching '{}'", key));
        match key {
            QueryKey::Categories => Ok(QueryData::Categories(self.db.categories().list()?)),
            QueryKey::TodayRecords(date) => Ok(QueryData::Records(self.db.records().fetch_today(*date)?)),
            QueryKey::WeekRecords(week_start) => Ok(QueryData::Records(self.db.records().fetch_week(*week_start)?)),
            QueryKey::WeekStats(week_start) => {
                let records = self.db.records().fetch_week(*week_start)?;
                let categories = self.db.categories().list()?;
                Ok(QueryData::WeekStats(WeekStats::compute(*week_start, &records, &categories)))
            }
        }
    }

    /// Refetches every query that was served stale since the last call.
    ///
    /// A failed refresh keeps the stale value cached and is logged; it is not
    /// retried until the key is served stale again. Returns the number of
    /// refreshed keys.
    #[instrument(skip(self))]
    pub fn run_background_refreshes(&mut self) -> usize {
        let mut refreshed = 0;
        for key in self.cache.take_pending_refreshes() {
            match self.fetch(&key) {
                Ok(data) => {
                    self.cache.store(key, data);
                    refreshed += 1;
                }
                Err(e) => msg_warning!(Message::CacheRefreshFailed(key.to_string(), e.to_string())),
            }
        }
        if refreshed > 0 {
            msg_debug!(Message::CacheRefreshed(refreshed));
        }
        refreshed
    }

    // --- mutations ---

    pub fn create_category(&mut self, category: &NewCategory) -> StoreResult<i64> {
        let id = self.db.categories().insert(category)?;
        self.invalidate_after_category_change();
        Ok(id)
    }

    pub fn update_category(&mut self, id: i64, update: &CategoryUpdate) -> StoreResult<UpdateOutcome> {
        let outcome = self.db.categories().update(id, update)?;
        self.invalidate_after_category_change();
        Ok(outcome)
    }

    /// Deletes a category. Records referencing it keep their `category_id`.
    pub fn delete_category(&mut self, id: i64) -> StoreResult<usize> {
        let deleted = self.db.categories().delete(id)?;
        self.invalidate_after_category_change();
        Ok(deleted)
    }

    pub fn create_record(&mut self, record: &NewRecord) -> StoreResult<i64> {
        let id = self.db.records().insert(record)?;
        self.invalidate_after_record_change();
        Ok(id)
    }

    pub fn update_record(&mut self, id: i64, update: &RecordUpdate) -> StoreResult<UpdateOutcome> {
        let outcome = self.db.records().update(id, update)?;
        self.invalidate_after_record_change();
        Ok(outcome)
    }

    pub fn delete_record(&mut self, id: i64) -> StoreResult<usize> {
        let deleted = self.db.records().delete(id)?;
        self.invalidate_after_record_change();
        Ok(deleted)
    }

    fn invalidate_after_record_change(&mut self) {
        self.cache.invalidate_namespace(Namespace::Records);
        self.cache.invalidate_namespace(Namespace::Stats);
    }

    fn invalidate_after_category_change(&mut self) {
        self.cache.invalidate_namespace(Namespace::Categories);
        self.invalidate_after_record_change();
    }
}
