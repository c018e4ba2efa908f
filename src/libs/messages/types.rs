/// Every message the application can show to the user.
///
/// Variants carry the values interpolated into the text; the wording itself
/// is defined by the `Display` implementation in `display.rs`.
#[derive(Debug, Clone)]
pub enum Message {
    // === CATEGORY MESSAGES ===
    CategoryCreated(String),
    CategoryUpdated(i64),
    CategoryUnchanged(i64),
    CategoryDeleted(i64),
    CategoryNotFound(String),
    CategoryListHeader,
    NoCategoriesFound,
    ConfirmDeleteCategory(String),
    CategoryOrphanedRecords(String, usize), // name, dangling record count

    // === RECORD MESSAGES ===
    RecordCreated(i64),
    RecordUpdated(i64),
    RecordUnchanged(i64),
    RecordDeleted(i64),
    RecordNotFound(i64),
    RecordRejected(String), // validation error
    RecordsHeader(String),  // date range
    NoRecordsFound(String), // date range
    ConfirmDeleteRecord(i64),

    // === TIMELINE MESSAGES ===
    TimelineHeader(String), // date
    TimelineWatching,
    TimelineStopped,
    WeekHeader(String),  // week start
    StatsHeader(String), // week start
    NoStatsForWeek(String),

    // === STORE MESSAGES ===
    StoreReady(String), // path
    StoreInitFailed(String),
    DefaultCategoriesSeeded(usize),

    // === CACHE MESSAGES ===
    CacheRefreshFailed(String, String), // key, error
    CacheRefreshed(usize),
    CacheGarbageCollected(usize),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleDatabase,
    ConfigModuleCache,
    ConfigModuleTimeline,

    // === EXPORT MESSAGES ===
    ExportCompleted(String), // path
    NothingToExport,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    DatabaseUpToDate,

    // === PROMPTS ===
    PromptSelectModules,
    PromptDatabaseFile,
    PromptStaleSeconds(String), // query kind
    PromptGcSeconds(String),    // query kind
    PromptTickInterval,
    PromptPixelsPerMinute,

    // === GENERAL MESSAGES ===
    OperationCancelled,
    DataStoragePathError,
}
