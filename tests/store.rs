#[cfg(test)]
mod tests {
    use daylog::db::categories::DEFAULT_CATEGORIES;
    use daylog::db::db::{Db, StoreError};
    use daylog::db::migrations::{get_db_version, needs_migration, MigrationManager};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct StoreTestContext {
        temp_dir: TempDir,
    }

    impl StoreTestContext {
        fn db_path(&self) -> PathBuf {
            self.temp_dir.path().join("daylog.db")
        }
    }

    impl TestContext for StoreTestContext {
        fn setup() -> Self {
            StoreTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_init_applies_all_migrations(ctx: &mut StoreTestContext) {
        let mut db = Db::open(ctx.db_path()).unwrap();
        assert_eq!(get_db_version(&db.conn).unwrap(), 0);
        assert!(needs_migration(&db.conn).unwrap());

        db.init().unwrap();

        assert_eq!(get_db_version(&db.conn).unwrap(), MigrationManager::new().latest_version());
        assert!(!needs_migration(&db.conn).unwrap());

        let history = MigrationManager::new().get_migration_history(&db.conn).unwrap();
        for (i, (version, _, _)) in history.iter().enumerate() {
            assert_eq!(*version as usize, i + 1);
        }
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_init_seeds_default_categories_once(ctx: &mut StoreTestContext) {
        let mut db = Db::open(ctx.db_path()).unwrap();
        db.init().unwrap();
        db.init().unwrap();

        let categories = db.categories().list().unwrap();
        assert_eq!(categories.len(), DEFAULT_CATEGORIES.len());

        let work = db.categories().get_by_name("Work").unwrap().unwrap();
        assert_eq!(work.color_hex.as_deref(), Some("#3b82f6"));
        let exercise = db.categories().get_by_name("exercise").unwrap().unwrap();
        assert_eq!(exercise.color_hex.as_deref(), Some("#22c55e"));
        let others = db.categories().get_by_name("Others").unwrap().unwrap();
        assert_eq!(others.color_hex.as_deref(), Some("#a855f7"));
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_defaults_are_not_restored_while_any_category_exists(ctx: &mut StoreTestContext) {
        let mut db = Db::open(ctx.db_path()).unwrap();
        db.init().unwrap();

        let work = db.categories().get_by_name("Work").unwrap().unwrap();
        db.categories().delete(work.id).unwrap();
        drop(db);

        let mut db = Db::open(ctx.db_path()).unwrap();
        db.init().unwrap();
        assert_eq!(db.categories().count().unwrap(), DEFAULT_CATEGORIES.len() - 1);
        assert!(db.categories().get_by_name("Work").unwrap().is_none());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_empty_categories_table_is_seeded_again(ctx: &mut StoreTestContext) {
        let mut db = Db::open(ctx.db_path()).unwrap();
        db.init().unwrap();
        for category in db.categories().list().unwrap() {
            db.categories().delete(category.id).unwrap();
        }

        db.init().unwrap();
        assert_eq!(db.categories().count().unwrap(), DEFAULT_CATEGORIES.len());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_data_survives_reopening(ctx: &mut StoreTestContext) {
        let mut db = Db::open(ctx.db_path()).unwrap();
        db.init().unwrap();
        let ids: Vec<i64> = db.categories().list().unwrap().iter().map(|c| c.id).collect();
        assert_eq!(db.path(), Some(ctx.db_path().as_path()));
        drop(db);

        let mut db = Db::open(ctx.db_path()).unwrap();
        db.init().unwrap();
        let reopened: Vec<i64> = db.categories().list().unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, reopened);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_init_fails_on_a_file_that_is_not_a_database(ctx: &mut StoreTestContext) {
        std::fs::write(ctx.db_path(), "this is a plain text file and certainly not an sqlite database\n".repeat(16)).unwrap();

        let result = Db::open(ctx.db_path()).and_then(|mut db| db.init());
        assert!(result.is_err());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_failed_migration_leaves_no_partial_schema(ctx: &mut StoreTestContext) {
        let mut db = Db::open(ctx.db_path()).unwrap();
        db.conn.execute("CREATE TABLE categories (id INTEGER PRIMARY KEY, title TEXT)", []).unwrap();

        let result = db.init();
        assert!(matches!(result, Err(StoreError::Migration(_))));

        assert_eq!(get_db_version(&db.conn).unwrap(), 0);
        assert!(MigrationManager::new().get_migration_history(&db.conn).unwrap().is_empty());
        let records_table: i64 = db
            .conn
            .query_row("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'records'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(records_table, 0);
    }
}
