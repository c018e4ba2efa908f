use super::{category::resolve_category, date_or_today};
use crate::{
    db::{db::UpdateOutcome, records::RecordUpdate},
    libs::{
        calendar,
        clock::Clock,
        input::{parse_minutes, parse_time, RecordInput},
        messages::Message,
        tracker::Tracker,
        view::View,
        view_state::DefaultCategorySelection,
    },
    msg_error, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct RecordArgs {
    #[command(subcommand)]
    command: RecordCommand,
}

#[derive(Debug, Subcommand)]
enum RecordCommand {
    /// Log an activity
    Add {
        #[arg(default_value = "")]
        description: String,
        /// Category id or name; defaults to the newest category
        #[arg(short, long)]
        category: Option<String>,
        /// Log without a category
        #[arg(long, conflicts_with = "category")]
        uncategorized: bool,
        /// Day of the activity (YYYY-MM-DD), today by default
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Start time (HH:MM), now by default
        #[arg(short, long)]
        start: Option<String>,
        /// Duration in minutes
        #[arg(short, long)]
        minutes: Option<String>,
        /// Finish time (HH:MM), used when no duration is given
        #[arg(short, long)]
        finish: Option<String>,
    },
    /// List the records of a day, or of its week
    List {
        #[arg(short, long)]
        date: Option<NaiveDate>,
        #[arg(short, long)]
        week: bool,
    },
    /// Change fields of a record
    Edit {
        id: i64,
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long, conflicts_with = "category")]
        uncategorized: bool,
        #[arg(short, long)]
        minutes: Option<String>,
        #[arg(short, long)]
        date: Option<NaiveDate>,
        #[arg(short, long)]
        start: Option<String>,
    },
    /// Delete a record
    Delete {
        id: i64,
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: RecordArgs) -> Result<()> {
    let mut tracker = super::open_tracker()?;
    match args.command {
        RecordCommand::Add {
            description,
            category,
            uncategorized,
            date,
            start,
            minutes,
            finish,
        } => {
            let category_id = match pick_category(&mut tracker, category, uncategorized)? {
                Ok(category_id) => category_id,
                Err(identifier) => {
                    msg_error!(Message::CategoryNotFound(identifier));
                    return Ok(());
                }
            };
            let input = RecordInput {
                category_id,
                description,
                date: date_or_today(date),
                start: start.unwrap_or_else(|| Local::now().format("%H:%M").to_string()),
                minutes,
                finish,
            };
            handle_add(&mut tracker, input)
        }
        RecordCommand::List { date, week } => handle_list(&mut tracker, date_or_today(date), week),
        RecordCommand::Edit {
            id,
            description,
            category,
            uncategorized,
            minutes,
            date,
            start,
        } => {
            let mut update = RecordUpdate::default();
            if let Some(description) = description {
                update = update.description(description.trim());
            }
            if uncategorized {
                update = update.category_id(None);
            } else if let Some(identifier) = category {
                match resolve_category(&mut tracker, &identifier)? {
                    Some(category) => update = update.category_id(Some(category.id)),
                    None => {
                        msg_error!(Message::CategoryNotFound(identifier));
                        return Ok(());
                    }
                }
            }
            handle_edit(&mut tracker, id, update, minutes, date, start)
        }
        RecordCommand::Delete { id, yes } => handle_delete(&mut tracker, id, yes),
    }
}

/// `Ok(Err(identifier))` when the named category does not exist.
fn pick_category<C: Clock>(tracker: &mut Tracker<C>, category: Option<String>, uncategorized: bool) -> Result<std::result::Result<Option<i64>, String>> {
    if uncategorized {
        return Ok(Ok(None));
    }
    match category {
        Some(identifier) => Ok(resolve_category(tracker, &identifier)?.map(|c| Some(c.id)).ok_or(identifier)),
        None => {
            let mut selection = DefaultCategorySelection::new();
            selection.on_categories_loaded(&tracker.categories()?);
            Ok(Ok(selection.selected()))
        }
    }
}

fn handle_add<C: Clock>(tracker: &mut Tracker<C>, input: RecordInput) -> Result<()> {
    let record = match input.validate() {
        Ok(record) => record,
        Err(e) => {
            msg_warning!(Message::RecordRejected(e.to_string()));
            return Ok(());
        }
    };
    let id = tracker.create_record(&record)?;
    msg_success!(Message::RecordCreated(id));
    Ok(())
}

fn handle_list<C: Clock>(tracker: &mut Tracker<C>, date: NaiveDate, week: bool) -> Result<()> {
    let (label, records) = if week {
        let week_start = calendar::week_start(date);
        (format!("the week of {}", week_start), tracker.week_records(date)?)
    } else {
        (date.to_string(), tracker.today_records(date)?)
    };

    if records.is_empty() {
        msg_info!(Message::NoRecordsFound(label));
        return Ok(());
    }

    let categories = tracker.categories()?;
    msg_print!(Message::RecordsHeader(label), true);
    View::records(&records, &categories)?;
    Ok(())
}

fn handle_edit<C: Clock>(
    tracker: &mut Tracker<C>,
    id: i64,
    mut update: RecordUpdate,
    minutes: Option<String>,
    date: Option<NaiveDate>,
    start: Option<String>,
) -> Result<()> {
    let record = match tracker.db().records().get_by_id(id)? {
        Some(record) => record,
        None => {
            msg_error!(Message::RecordNotFound(id));
            return Ok(());
        }
    };

    if let Some(minutes) = minutes {
        match parse_minutes(&minutes) {
            Ok(minutes) => update = update.minutes(minutes),
            Err(e) => {
                msg_warning!(Message::RecordRejected(e.to_string()));
                return Ok(());
            }
        }
    }

    if date.is_some() || start.is_some() {
        let current = calendar::to_local(record.timestamp);
        let time = match start.as_deref().map(parse_time).transpose() {
            Ok(time) => time.unwrap_or_else(|| current.time()),
            Err(e) => {
                msg_warning!(Message::RecordRejected(e.to_string()));
                return Ok(());
            }
        };
        update = update.timestamp(calendar::local_timestamp(date.unwrap_or_else(|| current.date_naive()), time));
    }

    match tracker.update_record(id, &update)? {
        UpdateOutcome::NoChanges => msg_info!(Message::RecordUnchanged(id)),
        UpdateOutcome::Updated(_) => msg_success!(Message::RecordUpdated(id)),
    }
    Ok(())
}

fn handle_delete<C: Clock>(tracker: &mut Tracker<C>, id: i64, yes: bool) -> Result<()> {
    if tracker.db().records().get_by_id(id)?.is_none() {
        msg_error!(Message::RecordNotFound(id));
        return Ok(());
    }

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteRecord(id).to_string())
            .default(false)
            .interact()?;

    if confirmed {
        tracker.delete_record(id)?;
        msg_success!(Message::RecordDeleted(id));
    } else {
        msg_info!(Message::OperationCancelled);
    }
    Ok(())
}
