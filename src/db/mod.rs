//! Database layer for the daylog application.
//!
//! A thin SQLite-backed persistence layer: one store handle, a migration
//! system and one data-access module per entity. Every function issues a
//! single parameterized statement (seeding aside) and returns the rows or the
//! mutation result; SQLite failures propagate unchanged.
//!
//! ## Usage
//!
//! ```rust
//! use daylog::db::{categories::NewCategory, db::Db};
//!
//! let mut db = Db::open_in_memory()?;
//! db.init()?;
//! let id = db.categories().insert(&NewCategory::new("Reading", Some("#f97316")))?;
//! assert!(db.categories().get_by_id(id)?.is_some());
//! # Ok::<(), daylog::db::db::StoreError>(())
//! ```

/// Store handle, error type and partial-update execution.
pub mod db;

/// Versioned schema migrations.
pub mod migrations;

/// Category CRUD and default seeding.
pub mod categories;

/// Record CRUD and time-range queries.
pub mod records;
