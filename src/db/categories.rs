//! Category storage.
//!
//! Categories are user-defined label/color pairs that records are grouped by.
//! The list is ordered newest first. Deleting a category never touches the
//! records that reference it.

use crate::db::db::{execute_update, StoreResult, UpdateOutcome};
use chrono::Utc;
use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_CATEGORY: &str = "INSERT INTO categories (name, color_hex, created_at) VALUES (?1, ?2, ?3)";
const SELECT_CATEGORIES: &str = "SELECT id, name, color_hex, created_at FROM categories ORDER BY created_at DESC, id DESC";
const SELECT_CATEGORY_BY_ID: &str = "SELECT id, name, color_hex, created_at FROM categories WHERE id = ?1";
const SELECT_CATEGORY_BY_NAME: &str = "SELECT id, name, color_hex, created_at FROM categories WHERE name = ?1 COLLATE NOCASE ORDER BY created_at DESC, id DESC LIMIT 1";
const COUNT_CATEGORIES: &str = "SELECT COUNT(*) FROM categories";
const DELETE_CATEGORY: &str = "DELETE FROM categories WHERE id = ?1";

/// Categories created on first start.
pub const DEFAULT_CATEGORIES: [(&str, &str); 3] = [("Work", "#3b82f6"), ("Exercise", "#22c55e"), ("Others", "#a855f7")];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color_hex: Option<String>,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub color_hex: Option<String>,
}

impl NewCategory {
    pub fn new(name: &str, color_hex: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            color_hex: color_hex.map(str::to_string),
        }
    }
}

/// Partial update of a category.
///
/// `None` leaves a column alone. `Some(..)` writes it, even when the value
/// equals what is already stored; `color_hex: Some(None)` clears the color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub color_hex: Option<Option<String>>,
}

impl CategoryUpdate {
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn color_hex(mut self, color_hex: Option<&str>) -> Self {
        self.color_hex = Some(color_hex.map(str::to_string));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }

    /// Columns this update will write.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        self.assignments().into_iter().map(|(column, _)| column).collect()
    }

    fn assignments(&self) -> Vec<(&'static str, Value)> {
        let mut assignments = Vec::new();
        if let Some(name) = &self.name {
            assignments.push(("name", Value::Text(name.clone())));
        }
        if let Some(color_hex) = &self.color_hex {
            assignments.push(("color_hex", color_hex.clone().map_or(Value::Null, Value::Text)));
        }
        assignments
    }
}

pub struct Categories<'a> {
    conn: &'a Connection,
}

impl<'a> Categories<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Inserts a category and returns its id. The name is stored as given.
    pub fn insert(&self, category: &NewCategory) -> StoreResult<i64> {
        self.conn
            .execute(INSERT_CATEGORY, params![category.name, category.color_hex, Utc::now().timestamp_millis()])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All categories, newest first.
    pub fn list(&self) -> StoreResult<Vec<Category>> {
        let mut stmt = self.conn.prepare(SELECT_CATEGORIES)?;
        let category_iter = stmt.query_map([], Self::from_row)?;

        let mut categories = Vec::new();
        for category in category_iter {
            categories.push(category?);
        }
        Ok(categories)
    }

    pub fn get_by_id(&self, id: i64) -> StoreResult<Option<Category>> {
        Ok(self.conn.query_row(SELECT_CATEGORY_BY_ID, params![id], Self::from_row).optional()?)
    }

    /// Case-insensitive lookup; the newest category wins when names repeat.
    pub fn get_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
        Ok(self.conn.query_row(SELECT_CATEGORY_BY_NAME, params![name], Self::from_row).optional()?)
    }

    pub fn count(&self) -> StoreResult<usize> {
        let count: i64 = self.conn.query_row(COUNT_CATEGORIES, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn update(&self, id: i64, update: &CategoryUpdate) -> StoreResult<UpdateOutcome> {
        execute_update(self.conn, "categories", id, update.assignments())
    }

    /// Deletes the category and returns the number of removed rows.
    pub fn delete(&self, id: i64) -> StoreResult<usize> {
        Ok(self.conn.execute(DELETE_CATEGORY, params![id])?)
    }

    /// Inserts [`DEFAULT_CATEGORIES`] when the table is empty.
    ///
    /// Returns how many categories were created.
    pub fn seed_defaults(&self) -> StoreResult<usize> {
        if self.count()? > 0 {
            return Ok(0);
        }
        let created_at = Utc::now().timestamp_millis();
        let tx = self.conn.unchecked_transaction()?;
        for (name, color_hex) in DEFAULT_CATEGORIES {
            tx.execute(INSERT_CATEGORY, params![name, color_hex, created_at])?;
        }
        tx.commit()?;
        Ok(DEFAULT_CATEGORIES.len())
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
        Ok(Category {
            id: row.get(0)?,
            name: row.get(1)?,
            color_hex: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}
