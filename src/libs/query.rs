//! Client-side read cache for store queries.
//!
//! Every cached value is keyed by what it means ([`QueryKey`]), not by the SQL
//! that produced it. Each key kind has a [`CachePolicy`]:
//!
//! - younger than `stale_time`: served as is ([`Lookup::Fresh`])
//! - older than `stale_time`: still served, and a refresh is queued
//!   ([`Lookup::Stale`]); the queue is drained by
//!   [`Tracker::run_background_refreshes`](crate::libs::tracker::Tracker::run_background_refreshes)
//! - not read for `gc_time`: discarded ([`Lookup::Miss`])
//!
//! Mutations invalidate whole namespaces. An invalidated entry is never
//! served again; the next read refetches.
//!
//! ```text
//!   lookup ──▶ missing / expired / invalidated ──▶ Miss   (caller fetches)
//!      │
//!      └────▶ age < stale_time ─────────────────▶ Fresh
//!      └────▶ age ≥ stale_time ─────────────────▶ Stale  (+ refresh queued)
//! ```

use crate::db::categories::Category;
use crate::db::records::Record;
use crate::libs::clock::Clock;
use crate::libs::stats::WeekStats;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use std::collections::HashMap;
use std::fmt;

/// Group of keys that a mutation invalidates together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Categories,
    Records,
    Stats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Categories,
    TodayRecords,
    WeekRecords,
    WeekStats,
}

impl QueryKind {
    pub fn label(&self) -> &'static str {
        match self {
            QueryKind::Categories => "categories",
            QueryKind::TodayRecords => "today's records",
            QueryKind::WeekRecords => "week records",
            QueryKind::WeekStats => "week statistics",
        }
    }
}

/// Semantic identity of a cached query. Week keys always carry a Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Categories,
    TodayRecords(NaiveDate),
    WeekRecords(NaiveDate),
    WeekStats(NaiveDate),
}

impl QueryKey {
    pub fn namespace(&self) -> Namespace {
        match self {
            QueryKey::Categories => Namespace::Categories,
            QueryKey::TodayRecords(_) | QueryKey::WeekRecords(_) => Namespace::Records,
            QueryKey::WeekStats(_) => Namespace::Stats,
        }
    }

    pub fn kind(&self) -> QueryKind {
        match self {
            QueryKey::Categories => QueryKind::Categories,
            QueryKey::TodayRecords(_) => QueryKind::TodayRecords,
            QueryKey::WeekRecords(_) => QueryKind::WeekRecords,
            QueryKey::WeekStats(_) => QueryKind::WeekStats,
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::Categories => write!(f, "categories"),
            QueryKey::TodayRecords(date) => write!(f, "records/today/{}", date),
            QueryKey::WeekRecords(week_start) => write!(f, "records/week/{}", week_start),
            QueryKey::WeekStats(week_start) => write!(f, "stats/week/{}", week_start),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub stale_time: TimeDelta,
    pub gc_time: TimeDelta,
}

impl CachePolicy {
    pub fn new(stale_time: TimeDelta, gc_time: TimeDelta) -> Self {
        Self { stale_time, gc_time }
    }
}

/// Policy per query kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicies {
    pub categories: CachePolicy,
    pub today_records: CachePolicy,
    pub week_records: CachePolicy,
    pub week_stats: CachePolicy,
}

impl Default for CachePolicies {
    fn default() -> Self {
        Self {
            categories: CachePolicy::new(TimeDelta::minutes(5), TimeDelta::minutes(30)),
            today_records: CachePolicy::new(TimeDelta::minutes(1), TimeDelta::minutes(10)),
            week_records: CachePolicy::new(TimeDelta::minutes(2), TimeDelta::minutes(15)),
            week_stats: CachePolicy::new(TimeDelta::minutes(5), TimeDelta::minutes(30)),
        }
    }
}

impl CachePolicies {
    pub fn for_kind(&self, kind: QueryKind) -> CachePolicy {
        match kind {
            QueryKind::Categories => self.categories,
            QueryKind::TodayRecords => self.today_records,
            QueryKind::WeekRecords => self.week_records,
            QueryKind::WeekStats => self.week_stats,
        }
    }
}

/// Cached query result.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryData {
    Categories(Vec<Category>),
    Records(Vec<Record>),
    WeekStats(WeekStats),
}

impl QueryData {
    pub fn into_categories(self) -> Option<Vec<Category>> {
        match self {
            QueryData::Categories(categories) => Some(categories),
            _ => None,
        }
    }

    pub fn into_records(self) -> Option<Vec<Record>> {
        match self {
            QueryData::Records(records) => Some(records),
            _ => None,
        }
    }

    pub fn into_week_stats(self) -> Option<WeekStats> {
        match self {
            QueryData::WeekStats(stats) => Some(stats),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Fresh(QueryData),
    Stale(QueryData),
    Miss,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    data: QueryData,
    updated_at: DateTime<Utc>,
    last_accessed: DateTime<Utc>,
    invalidated: bool,
}

pub struct QueryCache<C: Clock> {
    entries: HashMap<QueryKey, CacheEntry>,
    pending_refreshes: Vec<QueryKey>,
    policies: CachePolicies,
    clock: C,
}

impl<C: Clock> QueryCache<C> {
    pub fn new(policies: CachePolicies, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            pending_refreshes: Vec::new(),
            policies,
            clock,
        }
    }

    pub fn policies(&self) -> &CachePolicies {
        &self.policies
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn lookup(&mut self, key: &QueryKey) -> Lookup {
        let now = self.clock.now();
        let policy = self.policies.for_kind(key.kind());

        let Some(entry) = self.entries.get_mut(key) else {
            return Lookup::Miss;
        };

        if now - entry.last_accessed >= policy.gc_time {
            self.entries.remove(key);
            return Lookup::Miss;
        }

        if entry.invalidated {
            return Lookup::Miss;
        }

        entry.last_accessed = now;
        if now - entry.updated_at >= policy.stale_time {
            let data = entry.data.clone();
            self.queue_refresh(*key);
            Lookup::Stale(data)
        } else {
            Lookup::Fresh(entry.data.clone())
        }
    }

    /// Stores a freshly fetched value, clearing any invalidation for the key.
    pub fn store(&mut self, key: QueryKey, data: QueryData) {
        let now = self.clock.now();
        self.entries.insert(
            key,
            CacheEntry {
                data,
                updated_at: now,
                last_accessed: now,
                invalidated: false,
            },
        );
        self.pending_refreshes.retain(|pending| pending != &key);
    }

    /// Marks every entry of the namespace as invalidated and returns how many were hit.
    pub fn invalidate_namespace(&mut self, namespace: Namespace) -> usize {
        let mut count = 0;
        for (key, entry) in self.entries.iter_mut() {
            if key.namespace() == namespace {
                entry.invalidated = true;
                count += 1;
            }
        }
        self.pending_refreshes.retain(|key| key.namespace() != namespace);
        count
    }

    pub fn is_invalidated(&self, key: &QueryKey) -> bool {
        self.entries.get(key).is_some_and(|entry| entry.invalidated)
    }

    /// Drops every entry that has not been read within its gc window.
    pub fn collect_garbage(&mut self) -> usize {
        let now = self.clock.now();
        let policies = self.policies;
        let before = self.entries.len();
        self.entries
            .retain(|key, entry| now - entry.last_accessed < policies.for_kind(key.kind()).gc_time);
        let entries = &self.entries;
        self.pending_refreshes.retain(|key| entries.contains_key(key));
        before - self.entries.len()
    }

    fn queue_refresh(&mut self, key: QueryKey) {
        if !self.pending_refreshes.contains(&key) {
            self.pending_refreshes.push(key);
        }
    }

    pub fn pending_refreshes(&self) -> &[QueryKey] {
        &self.pending_refreshes
    }

    pub fn take_pending_refreshes(&mut self) -> Vec<QueryKey> {
        std::mem::take(&mut self.pending_refreshes)
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::clock::ManualClock;
    use chrono::TimeZone;

    fn cache() -> (QueryCache<ManualClock>, ManualClock) {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 14, 9, 0, 0).unwrap());
        (QueryCache::new(CachePolicies::default(), clock.clone()), clock)
    }

    #[test]
    fn stale_lookup_queues_a_single_refresh() {
        let (mut cache, clock) = cache();
        cache.store(QueryKey::Categories, QueryData::Categories(vec![]));

        clock.advance(TimeDelta::minutes(6));
        assert!(matches!(cache.lookup(&QueryKey::Categories), Lookup::Stale(_)));
        assert!(matches!(cache.lookup(&QueryKey::Categories), Lookup::Stale(_)));
        assert_eq!(cache.pending_refreshes(), &[QueryKey::Categories]);
    }

    #[test]
    fn garbage_collection_uses_last_access() {
        let (mut cache, clock) = cache();
        let date = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
        cache.store(QueryKey::TodayRecords(date), QueryData::Records(vec![]));
        cache.store(QueryKey::Categories, QueryData::Categories(vec![]));

        clock.advance(TimeDelta::minutes(11));
        assert_eq!(cache.collect_garbage(), 1);
        assert!(!cache.contains(&QueryKey::TodayRecords(date)));
        assert!(cache.contains(&QueryKey::Categories));
    }

    #[test]
    fn week_keys_fall_in_their_namespaces() {
        let monday = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
        assert_eq!(QueryKey::WeekRecords(monday).namespace(), Namespace::Records);
        assert_eq!(QueryKey::WeekStats(monday).namespace(), Namespace::Stats);
        assert_eq!(QueryKey::WeekStats(monday).to_string(), "stats/week/2024-05-13");
    }
}
