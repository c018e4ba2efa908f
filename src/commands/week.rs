use super::date_or_today;
use crate::{
    libs::{calendar, messages::Message, timeline::WeekGrid, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

#[derive(Debug, Args)]
pub struct WeekArgs {
    /// Any day of the week to show (YYYY-MM-DD), this week by default
    #[arg(short, long)]
    date: Option<NaiveDate>,
}

pub fn cmd(args: WeekArgs) -> Result<()> {
    let mut tracker = super::open_tracker()?;
    let date = date_or_today(args.date);
    let week_start = calendar::week_start(date);

    let records = tracker.week_records(date)?;
    if records.is_empty() {
        msg_info!(Message::NoRecordsFound(format!("the week of {}", week_start)));
        return Ok(());
    }

    let categories = tracker.categories()?;
    let grid = WeekGrid::build(week_start, &records);
    msg_print!(Message::WeekHeader(week_start.to_string()), true);
    View::week(&grid, &categories)?;
    Ok(())
}
