use crate::{
    db::{categories::Category, db::UpdateOutcome},
    libs::{
        clock::Clock,
        input::{category_update, CategoryInput},
        messages::Message,
        tracker::Tracker,
        view::View,
    },
    msg_error, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct CategoryArgs {
    #[command(subcommand)]
    command: Option<CategoryCommand>,
}

#[derive(Debug, Subcommand)]
enum CategoryCommand {
    /// Create a category
    Add {
        name: String,
        /// Color as #rrggbb
        #[arg(short, long)]
        color: Option<String>,
    },
    /// List categories, newest first
    List,
    /// Rename or recolor a category, by id or name
    Edit {
        category: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        color: Option<String>,
        /// Remove the color
        #[arg(long, conflicts_with = "color")]
        clear_color: bool,
    },
    /// Delete a category, by id or name
    Delete {
        category: String,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: CategoryArgs) -> Result<()> {
    let mut tracker = super::open_tracker()?;
    match args.command {
        Some(CategoryCommand::Add { name, color }) => handle_add(&mut tracker, name, color),
        Some(CategoryCommand::List) | None => handle_list(&mut tracker),
        Some(CategoryCommand::Edit {
            category,
            name,
            color,
            clear_color,
        }) => handle_edit(&mut tracker, category, name, color, clear_color),
        Some(CategoryCommand::Delete { category, yes }) => handle_delete(&mut tracker, category, yes),
    }
}

/// Finds a category by numeric id, falling back to a case-insensitive name match.
pub fn resolve_category<C: Clock>(tracker: &mut Tracker<C>, identifier: &str) -> Result<Option<Category>> {
    if let Ok(id) = identifier.parse::<i64>() {
        if let Some(category) = tracker.db().categories().get_by_id(id)? {
            return Ok(Some(category));
        }
    }
    Ok(tracker.db().categories().get_by_name(identifier)?)
}

fn handle_add<C: Clock>(tracker: &mut Tracker<C>, name: String, color: Option<String>) -> Result<()> {
    let input = CategoryInput { name, color_hex: color };
    let category = match input.validate() {
        Ok(category) => category,
        Err(e) => {
            msg_warning!(e);
            return Ok(());
        }
    };
    tracker.create_category(&category)?;
    msg_success!(Message::CategoryCreated(category.name));
    Ok(())
}

fn handle_list<C: Clock>(tracker: &mut Tracker<C>) -> Result<()> {
    let categories = tracker.categories()?;
    if categories.is_empty() {
        msg_info!(Message::NoCategoriesFound);
        return Ok(());
    }

    msg_print!(Message::CategoryListHeader, true);
    View::categories(&categories)?;
    Ok(())
}

fn handle_edit<C: Clock>(tracker: &mut Tracker<C>, identifier: String, name: Option<String>, color: Option<String>, clear_color: bool) -> Result<()> {
    let category = match resolve_category(tracker, &identifier)? {
        Some(category) => category,
        None => {
            msg_error!(Message::CategoryNotFound(identifier));
            return Ok(());
        }
    };

    let update = match category_update(name.as_deref(), color.as_deref(), clear_color) {
        Ok(update) => update,
        Err(e) => {
            msg_warning!(e);
            return Ok(());
        }
    };

    match tracker.update_category(category.id, &update)? {
        UpdateOutcome::NoChanges => msg_info!(Message::CategoryUnchanged(category.id)),
        UpdateOutcome::Updated(_) => msg_success!(Message::CategoryUpdated(category.id)),
    }
    Ok(())
}

fn handle_delete<C: Clock>(tracker: &mut Tracker<C>, identifier: String, yes: bool) -> Result<()> {
    let category = match resolve_category(tracker, &identifier)? {
        Some(category) => category,
        None => {
            msg_error!(Message::CategoryNotFound(identifier));
            return Ok(());
        }
    };

    let referenced = tracker.db().records().count_by_category(category.id)?;
    if referenced > 0 {
        msg_warning!(Message::CategoryOrphanedRecords(category.name.clone(), referenced));
    }

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteCategory(category.name.clone()).to_string())
            .default(false)
            .interact()?;

    if confirmed {
        tracker.delete_category(category.id)?;
        msg_success!(Message::CategoryDeleted(category.id));
    } else {
        msg_info!(Message::OperationCancelled);
    }
    Ok(())
}
