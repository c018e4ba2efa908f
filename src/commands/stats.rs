use super::date_or_today;
use crate::{
    libs::{messages::Message, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Any day of the week to summarize (YYYY-MM-DD), this week by default
    #[arg(short, long)]
    date: Option<NaiveDate>,
}

pub fn cmd(args: StatsArgs) -> Result<()> {
    let mut tracker = super::open_tracker()?;
    let stats = tracker.week_stats(date_or_today(args.date))?;

    if stats.is_empty() {
        msg_info!(Message::NoStatsForWeek(stats.week_start.to_string()));
        return Ok(());
    }

    msg_print!(Message::StatsHeader(stats.week_start.to_string()), true);
    View::stats(&stats)?;
    Ok(())
}
