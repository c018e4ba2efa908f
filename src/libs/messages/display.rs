//! Display implementation for application messages.
//!
//! Single source of truth for the wording of every user-facing line. Messages
//! with parameters interpolate them here so call sites only pick a variant.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CATEGORY MESSAGES ===
            Message::CategoryCreated(name) => format!("Category '{}' created", name),
            Message::CategoryUpdated(id) => format!("Category #{} updated", id),
            Message::CategoryUnchanged(id) => format!("Nothing to change for category #{}", id),
            Message::CategoryDeleted(id) => format!("Category #{} deleted", id),
            Message::CategoryNotFound(query) => format!("Category '{}' not found", query),
            Message::CategoryListHeader => "Categories".to_string(),
            Message::NoCategoriesFound => "No categories found".to_string(),
            Message::ConfirmDeleteCategory(name) => format!("Delete category '{}'?", name),
            Message::CategoryOrphanedRecords(name, count) => format!(
                "{} record(s) still reference category '{}' and will keep its id",
                count, name
            ),

            // === RECORD MESSAGES ===
            Message::RecordCreated(id) => format!("Record #{} logged", id),
            Message::RecordUpdated(id) => format!("Record #{} updated", id),
            Message::RecordUnchanged(id) => format!("Nothing to change for record #{}", id),
            Message::RecordDeleted(id) => format!("Record #{} deleted", id),
            Message::RecordNotFound(id) => format!("Record #{} not found", id),
            Message::RecordRejected(reason) => format!("Record not saved: {}", reason),
            Message::RecordsHeader(range) => format!("Records for {}", range),
            Message::NoRecordsFound(range) => format!("No records found for {}", range),
            Message::ConfirmDeleteRecord(id) => format!("Delete record #{}?", id),

            // === TIMELINE MESSAGES ===
            Message::TimelineHeader(date) => format!("Timeline for {}", date),
            Message::TimelineWatching => "Watching today's timeline, press Ctrl-C to stop".to_string(),
            Message::TimelineStopped => "Stopped watching the timeline".to_string(),
            Message::WeekHeader(week_start) => format!("Week of {}", week_start),
            Message::StatsHeader(week_start) => format!("Statistics for the week of {}", week_start),
            Message::NoStatsForWeek(week_start) => format!("Nothing logged in the week of {}", week_start),

            // === STORE MESSAGES ===
            Message::StoreReady(path) => format!("Database ready at {}", path),
            Message::StoreInitFailed(error) => format!("Failed to initialize the database: {}", error),
            Message::DefaultCategoriesSeeded(count) => format!("Created {} default categories", count),

            // === CACHE MESSAGES ===
            Message::CacheRefreshFailed(key, error) => format!("Background refresh of '{}' failed: {}", key, error),
            Message::CacheRefreshed(count) => format!("Refreshed {} cached queries", count),
            Message::CacheGarbageCollected(count) => format!("Discarded {} expired cache entries", count),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleDatabase => "Database settings".to_string(),
            Message::ConfigModuleCache => "Query cache settings".to_string(),
            Message::ConfigModuleTimeline => "Timeline settings".to_string(),

            // === EXPORT MESSAGES ===
            Message::ExportCompleted(path) => format!("Records exported to {}", path),
            Message::NothingToExport => "No records in the selected range".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed".to_string(),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select the settings to configure".to_string(),
            Message::PromptDatabaseFile => "Database file name".to_string(),
            Message::PromptStaleSeconds(kind) => format!("Seconds before cached {} turn stale", kind),
            Message::PromptGcSeconds(kind) => format!("Seconds before unused cached {} are discarded", kind),
            Message::PromptTickInterval => "Timeline refresh interval (seconds)".to_string(),
            Message::PromptPixelsPerMinute => "Timeline scale (units per minute)".to_string(),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
            Message::DataStoragePathError => "Failed to resolve the data directory".to_string(),
        };
        write!(f, "{}", text)
    }
}
