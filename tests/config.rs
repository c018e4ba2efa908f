#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use daylog::db::db::DB_FILE_NAME;
    use daylog::libs::config::{CacheConfig, CachePolicyConfig, Config, DatabaseConfig, TimelineConfig, CONFIG_FILE_NAME};
    use daylog::libs::data_storage::DATA_DIR_ENV;
    use daylog::libs::query::{CachePolicies, CachePolicy};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            ConfigTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_gives_defaults(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.temp_dir.path().join(CONFIG_FILE_NAME)).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.database_file_name(), DB_FILE_NAME);
        assert_eq!(config.cache_policies(), CachePolicies::default());
        assert_eq!(config.timeline(), TimelineConfig::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_saved_config_is_read_back(ctx: &mut ConfigTestContext) {
        let path = ctx.temp_dir.path().join(CONFIG_FILE_NAME);
        let config = Config {
            database: Some(DatabaseConfig {
                file_name: "work.db".to_string(),
            }),
            cache: Some(CacheConfig {
                week_stats: Some(CachePolicyConfig { stale_secs: 30, gc_secs: 120 }),
                ..CacheConfig::default()
            }),
            timeline: Some(TimelineConfig {
                tick_interval: 15,
                pixels_per_minute: 2.0,
            }),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::read_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.database_file_name(), "work.db");

        let policies = loaded.cache_policies();
        assert_eq!(policies.week_stats, CachePolicy::new(TimeDelta::seconds(30), TimeDelta::seconds(120)));
        assert_eq!(policies.today_records, CachePolicies::default().today_records);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_invalid_json_is_an_error(ctx: &mut ConfigTestContext) {
        let path = ctx.temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Config::read_from(&path).is_err());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_and_save_use_the_data_directory(ctx: &mut ConfigTestContext) {
        std::env::set_var(DATA_DIR_ENV, ctx.temp_dir.path());

        let mut config = Config::read().unwrap();
        config.timeline = Some(TimelineConfig {
            tick_interval: 5,
            pixels_per_minute: 1.5,
        });
        config.save().unwrap();

        assert!(ctx.temp_dir.path().join(CONFIG_FILE_NAME).exists());
        assert_eq!(Config::read().unwrap().timeline().tick_interval, 5);
    }
}
