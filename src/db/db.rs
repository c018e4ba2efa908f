//! Store handle and shared data-layer types.
//!
//! [`Db`] owns the SQLite connection. It is constructed explicitly by the
//! application at start-up and handed to consumers; nothing in the crate keeps
//! a global connection.

use crate::db::categories::Categories;
use crate::db::migrations::MigrationManager;
use crate::db::records::Records;
use crate::libs::config::Config;
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_info};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DB_FILE_NAME: &str = "daylog.db";

/// Failure raised by the data layer.
///
/// SQLite errors are carried unchanged so callers can inspect the original
/// constraint or syntax failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("migration failed: {0}")]
    Migration(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result of a partial update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// No field was marked as changed, so no statement was executed.
    NoChanges,
    /// The statement ran and touched this many rows (0 when the id is unknown).
    Updated(usize),
}

impl UpdateOutcome {
    pub fn rows_affected(&self) -> usize {
        match self {
            UpdateOutcome::NoChanges => 0,
            UpdateOutcome::Updated(rows) => *rows,
        }
    }
}

pub struct Db {
    pub conn: Connection,
    path: Option<PathBuf>,
}

impl Db {
    /// Opens the database file configured for this installation.
    pub fn new() -> anyhow::Result<Db> {
        let config = Config::read()?;
        let db_file_path = DataStorage::new().get_path(&config.database_file_name())?;
        Ok(Db::open(db_file_path)?)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Db> {
        let conn = Connection::open(path.as_ref())?;
        Ok(Db {
            conn,
            path: Some(path.as_ref().to_path_buf()),
        })
    }

    pub fn open_in_memory() -> StoreResult<Db> {
        Ok(Db {
            conn: Connection::open_in_memory()?,
            path: None,
        })
    }

    /// File backing this store, `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Brings the schema up to date and seeds the default categories.
    ///
    /// Safe to call on every start: migrations already applied are skipped and
    /// defaults are only inserted while the `categories` table is empty.
    pub fn init(&mut self) -> StoreResult<()> {
        MigrationManager::new()
            .run_migrations(&mut self.conn)
            .map_err(|e| StoreError::Migration(e.to_string()))?;

        let seeded = self.categories().seed_defaults()?;
        if seeded > 0 {
            msg_info!(Message::DefaultCategoriesSeeded(seeded));
        }
        Ok(())
    }

    pub fn categories(&self) -> Categories<'_> {
        Categories::new(&self.conn)
    }

    pub fn records(&self) -> Records<'_> {
        Records::new(&self.conn)
    }
}

/// Runs `UPDATE <table> SET ... WHERE id = ?` for the given column assignments.
///
/// An empty assignment list returns [`UpdateOutcome::NoChanges`] without
/// touching the connection.
pub(crate) fn execute_update(conn: &Connection, table: &str, id: i64, assignments: Vec<(&'static str, Value)>) -> StoreResult<UpdateOutcome> {
    if assignments.is_empty() {
        return Ok(UpdateOutcome::NoChanges);
    }

    let (columns, mut values): (Vec<&str>, Vec<Value>) = assignments.into_iter().unzip();
    let set_clause = columns.iter().map(|column| format!("{} = ?", column)).collect::<Vec<_>>().join(", ");
    let sql = format!("UPDATE {} SET {} WHERE id = ?", table, set_clause);
    values.push(Value::Integer(id));

    msg_debug!(format!("{} [{} value(s)]", sql, values.len()));
    let rows = conn.execute(&sql, params_from_iter(values))?;
    Ok(UpdateOutcome::Updated(rows))
}
