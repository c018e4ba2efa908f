//! Platform data directory for the database and the configuration file.
//!
//! - Windows: `%LOCALAPPDATA%\daylog`
//! - macOS: `~/Library/Application Support/daylog`
//! - Linux and others: `~/.local/share/daylog`
//!
//! `DAYLOG_DATA_DIR` replaces the whole path when set.

use crate::libs::messages::Message;
use anyhow::{Context, Result};
use std::env::consts::OS;
use std::env::var;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "daylog";
pub const DATA_DIR_ENV: &str = "DAYLOG_DATA_DIR";

#[derive(Debug, Clone)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStorage {
    pub fn new() -> Self {
        if let Ok(dir) = var(DATA_DIR_ENV) {
            if !dir.is_empty() {
                return Self::at(dir);
            }
        }

        let base_path = match OS {
            "windows" => var("LOCALAPPDATA").unwrap_or_else(|_| ".".into()),
            "macos" => var("HOME").unwrap_or_else(|_| ".".into()) + "/Library/Application Support",
            _ => var("HOME").unwrap_or_else(|_| ".".into()) + "/.local/share",
        };
        Self::at(Path::new(&base_path).join(APP_NAME))
    }

    pub fn at<P: Into<PathBuf>>(base_path: P) -> Self {
        Self { base_path: base_path.into() }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of `file_name` inside the data directory, creating the directory if needed.
    pub fn get_path(&self, file_name: &str) -> Result<PathBuf> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path).with_context(|| format!("{}: {}", Message::DataStoragePathError, self.base_path.display()))?;
        }
        Ok(self.base_path.join(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_path_creates_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DataStorage::at(dir.path().join("nested").join("daylog"));
        let path = storage.get_path("config.json").unwrap();

        assert!(storage.base_path().is_dir());
        assert_eq!(path, dir.path().join("nested").join("daylog").join("config.json"));
    }

    #[test]
    fn default_directory_ends_with_the_app_name() {
        if var(DATA_DIR_ENV).is_ok() {
            return;
        }
        let storage = DataStorage::new();
        assert_eq!(storage.base_path().file_name().and_then(|name| name.to_str()), Some(APP_NAME));
        if OS == "linux" {
            assert!(storage.base_path().ends_with(".local/share/daylog"));
        }
    }
}
