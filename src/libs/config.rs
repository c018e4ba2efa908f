//! Configuration for daylog.
//!
//! Stored as pretty-printed JSON in the data directory (see
//! [`DataStorage`]). Every section is optional; a missing file or section
//! means defaults.
//!
//! ```json
//! {
//!   "database": { "file_name": "daylog.db" },
//!   "cache": { "today_records": { "stale_secs": 60, "gc_secs": 600 } },
//!   "timeline": { "tick_interval": 60, "pixels_per_minute": 1.0 }
//! }
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use daylog::libs::config::Config;
//!
//! let config = Config::read()?;
//! let policies = config.cache_policies();
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::db::db::DB_FILE_NAME;
use crate::libs::messages::Message;
use crate::libs::query::{CachePolicies, CachePolicy, QueryKind};
use anyhow::{Context, Result};
use chrono::TimeDelta;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DatabaseConfig {
    pub file_name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            file_name: DB_FILE_NAME.to_string(),
        }
    }
}

/// Stale and gc times of one query kind, in seconds.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CachePolicyConfig {
    pub stale_secs: i64,
    pub gc_secs: i64,
}

impl From<CachePolicy> for CachePolicyConfig {
    fn from(policy: CachePolicy) -> Self {
        Self {
            stale_secs: policy.stale_time.num_seconds(),
            gc_secs: policy.gc_time.num_seconds(),
        }
    }
}

impl From<CachePolicyConfig> for CachePolicy {
    fn from(config: CachePolicyConfig) -> Self {
        CachePolicy::new(TimeDelta::seconds(config.stale_secs.max(0)), TimeDelta::seconds(config.gc_secs.max(0)))
    }
}

/// Per-kind overrides; kinds left out keep their default policy.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CacheConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<CachePolicyConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today_records: Option<CachePolicyConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_records: Option<CachePolicyConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_stats: Option<CachePolicyConfig>,
}

impl CacheConfig {
    fn slot(&mut self, kind: QueryKind) -> &mut Option<CachePolicyConfig> {
        match kind {
            QueryKind::Categories => &mut self.categories,
            QueryKind::TodayRecords => &mut self.today_records,
            QueryKind::WeekRecords => &mut self.week_records,
            QueryKind::WeekStats => &mut self.week_stats,
        }
    }

    pub fn policies(&self) -> CachePolicies {
        let defaults = CachePolicies::default();
        CachePolicies {
            categories: self.categories.map_or(defaults.categories, Into::into),
            today_records: self.today_records.map_or(defaults.today_records, Into::into),
            week_records: self.week_records.map_or(defaults.week_records, Into::into),
            week_stats: self.week_stats.map_or(defaults.week_stats, Into::into),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TimelineConfig {
    /// Seconds between redraws of the current-time line.
    pub tick_interval: u64,
    pub pixels_per_minute: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            tick_interval: 60,
            pixels_per_minute: 1.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<TimelineConfig>,
}

impl Config {
    /// Reads the configuration from the data directory, or defaults when there is none.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config: Config = serde_json::from_str(&config_str).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path).with_context(|| format!("writing {}", path.display()))?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn database_file_name(&self) -> String {
        self.database.clone().unwrap_or_default().file_name
    }

    pub fn cache_policies(&self) -> CachePolicies {
        self.cache.clone().unwrap_or_default().policies()
    }

    pub fn timeline(&self) -> TimelineConfig {
        self.timeline.clone().unwrap_or_default()
    }

    /// Interactive setup. Current values are offered as defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = [
            ConfigModule {
                key: "database".to_string(),
                name: Message::ConfigModuleDatabase.to_string(),
            },
            ConfigModule {
                key: "cache".to_string(),
                name: Message::ConfigModuleCache.to_string(),
            },
            ConfigModule {
                key: "timeline".to_string(),
                name: Message::ConfigModuleTimeline.to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "database" => {
                    let current = config.database.clone().unwrap_or_default();
                    config.database = Some(DatabaseConfig {
                        file_name: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptDatabaseFile.to_string())
                            .default(current.file_name)
                            .interact_text()?,
                    });
                }
                "cache" => {
                    let mut cache = config.cache.clone().unwrap_or_default();
                    let policies = config.cache_policies();
                    for kind in [QueryKind::Categories, QueryKind::TodayRecords, QueryKind::WeekRecords, QueryKind::WeekStats] {
                        let current = CachePolicyConfig::from(policies.for_kind(kind));
                        let stale_secs = Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptStaleSeconds(kind.label().to_string()).to_string())
                            .default(current.stale_secs)
                            .interact_text()?;
                        let gc_secs = Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptGcSeconds(kind.label().to_string()).to_string())
                            .default(current.gc_secs)
                            .interact_text()?;
                        *cache.slot(kind) = Some(CachePolicyConfig { stale_secs, gc_secs });
                    }
                    config.cache = Some(cache);
                }
                "timeline" => {
                    let current = config.timeline();
                    config.timeline = Some(TimelineConfig {
                        tick_interval: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptTickInterval.to_string())
                            .default(current.tick_interval)
                            .interact_text()?,
                        pixels_per_minute: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptPixelsPerMinute.to_string())
                            .default(current.pixels_per_minute)
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{ "cache": { "today_records": { "stale_secs": 5, "gc_secs": 50 } } }"#).unwrap();
        let policies = config.cache_policies();

        assert_eq!(policies.today_records, CachePolicy::new(TimeDelta::seconds(5), TimeDelta::seconds(50)));
        assert_eq!(policies.categories, CachePolicies::default().categories);
        assert_eq!(config.database_file_name(), DB_FILE_NAME);
        assert_eq!(config.timeline().tick_interval, 60);
    }

    #[test]
    fn empty_config_serializes_to_an_empty_object() {
        assert_eq!(serde_json::to_string(&Config::default()).unwrap(), "{}");
    }
}
