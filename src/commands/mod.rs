//! Command-line interface.
//!
//! Each subcommand lives in its own module with an `Args` struct and a
//! `cmd` entry point. Commands that touch the data open a [`Tracker`]
//! through [`open_tracker`], which also brings the schema up to date.

pub mod category;
pub mod export;
pub mod init;
pub mod record;
pub mod stats;
pub mod today;
pub mod week;

use crate::db::db::Db;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::tracker::Tracker;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure daylog and create the database")]
    Init(init::InitArgs),
    #[command(about = "Manage categories")]
    Category(category::CategoryArgs),
    #[command(about = "Log, list, edit and delete records")]
    Record(record::RecordArgs),
    #[command(about = "Show today's timeline")]
    Today(today::TodayArgs),
    #[command(about = "Show a week of records by day")]
    Week(week::WeekArgs),
    #[command(about = "Show weekly statistics")]
    Stats(stats::StatsArgs),
    #[command(about = "Export records to CSV or JSON")]
    Export(export::ExportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Category(args) => category::cmd(args),
            Commands::Record(args) => record::cmd(args),
            Commands::Today(args) => today::cmd(args).await,
            Commands::Week(args) => week::cmd(args),
            Commands::Stats(args) => stats::cmd(args),
            Commands::Export(args) => export::cmd(args),
        }
    }
}

/// Opens the configured database, runs migrations and wraps it in a [`Tracker`].
pub fn open_tracker() -> Result<Tracker> {
    let config = Config::read()?;
    let mut db = Db::new()?;
    db.init().map_err(|e| msg_error_anyhow!(Message::StoreInitFailed(e.to_string())))?;
    Ok(Tracker::new(db, config.cache_policies()))
}

/// `--date` value or today.
pub(crate) fn date_or_today(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}
