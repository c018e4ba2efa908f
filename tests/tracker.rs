#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
    use daylog::db::categories::{CategoryUpdate, NewCategory};
    use daylog::db::db::{Db, UpdateOutcome};
    use daylog::db::records::{NewRecord, RecordUpdate};
    use daylog::libs::calendar;
    use daylog::libs::clock::ManualClock;
    use daylog::libs::query::{CachePolicies, QueryKey};
    use daylog::libs::tracker::Tracker;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct TrackerTestContext {
        _temp_dir: TempDir,
        clock: ManualClock,
        tracker: Tracker<ManualClock>,
    }

    impl TestContext for TrackerTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let mut db = Db::open(temp_dir.path().join("daylog.db")).unwrap();
            db.init().unwrap();
            let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 15, 8, 0, 0).unwrap());
            let tracker = Tracker::with_clock(db, CachePolicies::default(), clock.clone());
            TrackerTestContext {
                _temp_dir: temp_dir,
                clock,
                tracker,
            }
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }

    fn at(hour: u32, minute: u32) -> i64 {
        calendar::local_timestamp(day(), NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_fresh_data_is_served_from_cache(ctx: &mut TrackerTestContext) {
        assert_eq!(ctx.tracker.categories().unwrap().len(), 3);

        // Written behind the tracker's back, so the cache cannot know.
        ctx.tracker.db().categories().insert(&NewCategory::new("Hidden", None)).unwrap();

        ctx.clock.advance(TimeDelta::minutes(4));
        assert_eq!(ctx.tracker.categories().unwrap().len(), 3);
        assert!(ctx.tracker.cache().pending_refreshes().is_empty());
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_stale_data_is_served_and_refreshed_later(ctx: &mut TrackerTestContext) {
        ctx.tracker.categories().unwrap();
        ctx.tracker.db().categories().insert(&NewCategory::new("Hidden", None)).unwrap();

        ctx.clock.advance(TimeDelta::minutes(5));
        assert_eq!(ctx.tracker.categories().unwrap().len(), 3);
        assert_eq!(ctx.tracker.cache().pending_refreshes(), &[QueryKey::Categories]);

        // A second stale read does not queue the key twice.
        ctx.tracker.categories().unwrap();
        assert_eq!(ctx.tracker.cache().pending_refreshes().len(), 1);

        assert_eq!(ctx.tracker.run_background_refreshes(), 1);
        assert!(ctx.tracker.cache().pending_refreshes().is_empty());
        assert_eq!(ctx.tracker.categories().unwrap().len(), 4);
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_unused_entries_are_collected(ctx: &mut TrackerTestContext) {
        ctx.tracker.today_records(day()).unwrap();
        ctx.tracker.categories().unwrap();
        assert_eq!(ctx.tracker.cache().len(), 2);

        ctx.clock.advance(TimeDelta::minutes(10));
        assert_eq!(ctx.tracker.cache_mut().collect_garbage(), 1);
        assert!(!ctx.tracker.cache().contains(&QueryKey::TodayRecords(day())));
        assert!(ctx.tracker.cache().contains(&QueryKey::Categories));

        ctx.clock.advance(TimeDelta::minutes(20));
        assert_eq!(ctx.tracker.cache_mut().collect_garbage(), 1);
        assert!(ctx.tracker.cache().is_empty());
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_record_mutations_invalidate_records_and_stats(ctx: &mut TrackerTestContext) {
        ctx.tracker.categories().unwrap();
        assert!(ctx.tracker.today_records(day()).unwrap().is_empty());
        assert!(ctx.tracker.week_records(day()).unwrap().is_empty());
        assert!(ctx.tracker.week_stats(day()).unwrap().is_empty());

        let id = ctx.tracker.create_record(&NewRecord::new(None, "Standup", 30, at(9, 0))).unwrap();

        let monday = calendar::week_start(day());
        assert!(ctx.tracker.cache().is_invalidated(&QueryKey::TodayRecords(day())));
        assert!(ctx.tracker.cache().is_invalidated(&QueryKey::WeekRecords(monday)));
        assert!(ctx.tracker.cache().is_invalidated(&QueryKey::WeekStats(monday)));
        assert!(!ctx.tracker.cache().is_invalidated(&QueryKey::Categories));

        assert_eq!(ctx.tracker.today_records(day()).unwrap()[0].id, id);
        assert_eq!(ctx.tracker.week_records(day()).unwrap().len(), 1);
        assert_eq!(ctx.tracker.week_stats(day()).unwrap().total_minutes, 30);

        ctx.tracker.update_record(id, &RecordUpdate::default().minutes(45)).unwrap();
        assert_eq!(ctx.tracker.week_stats(day()).unwrap().total_minutes, 45);

        assert_eq!(ctx.tracker.delete_record(id).unwrap(), 1);
        assert!(ctx.tracker.today_records(day()).unwrap().is_empty());
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_no_op_updates_still_invalidate(ctx: &mut TrackerTestContext) {
        let work = ctx.tracker.categories().unwrap().into_iter().find(|c| c.name == "Work").unwrap();
        ctx.tracker.today_records(day()).unwrap();

        let outcome = ctx.tracker.update_category(work.id, &CategoryUpdate::default()).unwrap();
        assert_eq!(outcome, UpdateOutcome::NoChanges);
        assert!(ctx.tracker.cache().is_invalidated(&QueryKey::Categories));
        assert!(ctx.tracker.cache().is_invalidated(&QueryKey::TodayRecords(day())));
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_category_changes_reach_week_stats(ctx: &mut TrackerTestContext) {
        let work = ctx.tracker.categories().unwrap().into_iter().find(|c| c.name == "Work").unwrap();
        ctx.tracker.create_record(&NewRecord::new(Some(work.id), "Deep work", 90, at(10, 0))).unwrap();
        assert_eq!(ctx.tracker.week_stats(day()).unwrap().categories[0].name, "Work");

        ctx.tracker.update_category(work.id, &CategoryUpdate::default().name("Job")).unwrap();
        assert_eq!(ctx.tracker.week_stats(day()).unwrap().categories[0].name, "Job");

        ctx.tracker.delete_category(work.id).unwrap();
        let stats = ctx.tracker.week_stats(day()).unwrap();
        assert_eq!(stats.categories.len(), 1);
        assert_eq!(stats.categories[0].minutes, 90);
        assert_ne!(stats.categories[0].name, "Job");
        assert_eq!(ctx.tracker.today_records(day()).unwrap()[0].category_id, Some(work.id));
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_week_queries_share_a_key_per_week(ctx: &mut TrackerTestContext) {
        let sunday = NaiveDate::from_ymd_opt(2024, 5, 19).unwrap();
        ctx.tracker.week_records(day()).unwrap();
        ctx.tracker.week_records(sunday).unwrap();

        assert_eq!(ctx.tracker.cache().len(), 1);
        assert!(ctx.tracker.cache().contains(&QueryKey::WeekRecords(NaiveDate::from_ymd_opt(2024, 5, 13).unwrap())));
    }
}
