//! Application logic above the store: time math, caching, statistics,
//! view state, configuration and terminal output.

pub mod calendar;
pub mod clock;
pub mod config;
pub mod data_storage;
pub mod export;
pub mod formatter;
pub mod input;
pub mod logging;
pub mod messages;
pub mod query;
pub mod stats;
pub mod timeline;
pub mod tracker;
pub mod view;
pub mod view_state;
