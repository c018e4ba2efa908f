#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use daylog::db::db::Db;
    use daylog::db::records::NewRecord;
    use daylog::libs::calendar;
    use daylog::libs::export::{ExportFormat, ExportRecord, Exporter};
    use daylog::libs::stats::UNCATEGORIZED;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ExportTestContext {
        temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let mut db = Db::open(temp_dir.path().join("daylog.db")).unwrap();
            db.init().unwrap();

            let day = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
            let work = db.categories().get_by_name("Work").unwrap().unwrap();
            let at = |h| calendar::local_timestamp(day, NaiveTime::from_hms_opt(h, 0, 0).unwrap());
            db.records().insert(&NewRecord::new(Some(work.id), "Standup", 30, at(9))).unwrap();
            db.records().insert(&NewRecord::new(None, "Lunch", 45, at(12))).unwrap();

            ExportTestContext { temp_dir, db }
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_json(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("records.json");
        let records = ctx.db.records().fetch_today(day()).unwrap();
        let categories = ctx.db.categories().list().unwrap();

        let exporter = Exporter::new(ExportFormat::Json, Some(path.clone()));
        assert_eq!(exporter.export(&records, &categories).unwrap(), 2);

        let rows: Vec<ExportRecord> = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(rows[0].description, "Standup");
        assert_eq!(rows[0].category, "Work");
        assert_eq!(rows[1].category, UNCATEGORIZED);
        assert_eq!(rows[1].duration, "00:45");
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_csv(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("records.csv");
        let records = ctx.db.records().fetch_week(day()).unwrap();
        let categories = ctx.db.categories().list().unwrap();

        Exporter::new(ExportFormat::Csv, Some(path.clone())).export(&records, &categories).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,start,minutes"));
        assert!(lines[1].contains("Standup"));
        assert!(lines[2].contains("Lunch"));
    }

    #[test]
    fn test_default_file_name_matches_format() {
        let exporter = Exporter::new(ExportFormat::Json, None);
        let name = exporter.output_path().to_string_lossy().to_string();
        assert!(name.starts_with("daylog_export_"));
        assert!(name.ends_with(".json"));
    }
}
