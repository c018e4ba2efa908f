//! `daylog init`: interactive configuration and database setup.

use crate::{
    db::db::Db,
    libs::{config::Config, messages::Message},
    msg_error_anyhow, msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Skip the configuration wizard and only prepare the database
    #[arg(long)]
    no_config: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if !init_args.no_config {
        Config::init()?.save()?;
        msg_success!(Message::ConfigSaved);
    }

    let mut db = Db::new()?;
    db.init().map_err(|e| msg_error_anyhow!(Message::StoreInitFailed(e.to_string())))?;
    let path = db.path().map(|path| path.display().to_string()).unwrap_or_default();
    msg_info!(Message::StoreReady(path));
    Ok(())
}
