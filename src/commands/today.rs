//! `daylog today`: the day as a timeline, optionally kept up to date.

use super::date_or_today;
use crate::{
    libs::{
        calendar,
        clock::{Clock, SystemClock},
        config::Config,
        formatter::format_date,
        messages::Message,
        timeline::{minute_of_day, Timeline},
        tracker::Tracker,
        view::View,
        view_state::NowTicker,
    },
    msg_debug, msg_info, msg_print, msg_warning,
};
use anyhow::Result;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use clap::Args;
use std::time::Duration;

#[derive(Debug, Args)]
pub struct TodayArgs {
    /// Show another day instead of today (YYYY-MM-DD)
    #[arg(short, long)]
    date: Option<NaiveDate>,
    /// Redraw on every tick until Ctrl-C
    #[arg(short, long)]
    watch: bool,
}

pub async fn cmd(args: TodayArgs) -> Result<()> {
    let config = Config::read()?;
    let settings = config.timeline();
    let timeline = Timeline::new(settings.pixels_per_minute);
    let mut tracker = super::open_tracker()?;

    let fixed_date = args.date;
    let mut ticker = NowTicker::new(SystemClock, TimeDelta::seconds(settings.tick_interval.max(1) as i64));
    render(&mut tracker, &timeline, date_or_today(fixed_date), ticker.now())?;

    if !args.watch {
        return Ok(());
    }

    msg_info!(Message::TimelineWatching);
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Some(now) = ticker.tick() {
                    tracker.run_background_refreshes();
                    let collected = tracker.cache_mut().collect_garbage();
                    if collected > 0 {
                        msg_debug!(Message::CacheGarbageCollected(collected));
                    }
                    render(&mut tracker, &timeline, date_or_today(fixed_date), now)?;
                }
            }
            result = &mut shutdown => {
                if let Err(e) = result {
                    msg_warning!(e);
                }
                break;
            }
        }
    }

    msg_info!(Message::TimelineStopped);
    Ok(())
}

fn render<C: Clock>(tracker: &mut Tracker<C>, timeline: &Timeline, date: NaiveDate, now: DateTime<Utc>) -> Result<()> {
    let records = tracker.today_records(date)?;
    let categories = tracker.categories()?;
    let blocks = timeline.layout(date, &records);

    let now_ms = now.timestamp_millis();
    let now_minute = (calendar::local_date(now_ms) == date).then(|| minute_of_day(now_ms));

    msg_print!(Message::TimelineHeader(format_date(date)), true);
    if blocks.is_empty() {
        msg_info!(Message::NoRecordsFound(date.to_string()));
    }
    View::timeline(&blocks, &records, &categories, now_minute)?;
    Ok(())
}
