//! Ephemeral, non-persisted view state.
//!
//! - [`NowTicker`]: the "now" used to draw the current-time line. It moves
//!   forward in fixed steps and stands still while the app is in the background.
//! - [`duration_minutes`]: length of an activity given two picked times of day.
//! - [`DefaultCategorySelection`]: selects the first category once per load.

use crate::db::categories::Category;
use crate::libs::clock::Clock;
use chrono::{DateTime, NaiveTime, TimeDelta, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppActivity {
    Foreground,
    Background,
}

pub struct NowTicker<C: Clock> {
    clock: C,
    interval: TimeDelta,
    now: DateTime<Utc>,
    activity: AppActivity,
}

impl<C: Clock> NowTicker<C> {
    pub fn new(clock: C, interval: TimeDelta) -> Self {
        let now = clock.now();
        Self {
            clock,
            interval,
            now,
            activity: AppActivity::Foreground,
        }
    }

    /// Last published "now".
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn activity(&self) -> AppActivity {
        self.activity
    }

    pub fn is_paused(&self) -> bool {
        self.activity == AppActivity::Background
    }

    /// Publishes a new "now" if a full interval passed and the app is active.
    pub fn tick(&mut self) -> Option<DateTime<Utc>> {
        if self.is_paused() {
            return None;
        }
        let current = self.clock.now();
        if current - self.now >= self.interval {
            self.now = current;
            Some(current)
        } else {
            None
        }
    }

    /// Switches between foreground and background.
    ///
    /// Coming back to the foreground publishes the current time immediately
    /// instead of waiting for the next interval.
    pub fn set_activity(&mut self, activity: AppActivity) -> Option<DateTime<Utc>> {
        let resumed = self.activity == AppActivity::Background && activity == AppActivity::Foreground;
        self.activity = activity;
        if resumed {
            self.now = self.clock.now();
            Some(self.now)
        } else {
            None
        }
    }
}

/// Minutes from `start` to `finish`.
///
/// A finish earlier than the start is read as the next day.
pub fn duration_minutes(start: NaiveTime, finish: NaiveTime) -> i64 {
    let minutes = (finish - start).num_minutes();
    if minutes < 0 {
        minutes + 24 * 60
    } else {
        minutes
    }
}

/// One-shot default category selection.
///
/// When a category list arrives and nothing is selected yet, the first
/// category is picked. This happens at most once per load: after the user
/// clears the selection it stays cleared until [`reload`](Self::reload).
#[derive(Debug, Clone, Default)]
pub struct DefaultCategorySelection {
    selected: Option<i64>,
    applied: bool,
}

impl DefaultCategorySelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<i64> {
        self.selected
    }

    /// Applies the default if it has not fired yet; returns the picked id.
    pub fn on_categories_loaded(&mut self, categories: &[Category]) -> Option<i64> {
        if self.applied || self.selected.is_some() {
            return None;
        }
        let first = categories.first()?;
        self.selected = Some(first.id);
        self.applied = true;
        self.selected
    }

    /// Explicit user choice. Also consumes the one-shot default.
    pub fn select(&mut self, category_id: Option<i64>) {
        self.selected = category_id;
        self.applied = true;
    }

    /// Re-arms the default for the next category load.
    pub fn reload(&mut self) {
        self.applied = false;
    }
}
