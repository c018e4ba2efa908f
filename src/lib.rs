//! daylog: a personal activity log.
//!
//! Activities are recorded as time blocks with a duration and an optional
//! category, stored in a local SQLite database and read back through a
//! small query cache.
//!
//! - [`db`]: the store (categories, records, migrations).
//! - [`libs`]: cache, statistics, timeline layout, configuration and output.
//! - [`commands`]: the command-line interface.

pub mod commands;
pub mod db;
pub mod libs;
