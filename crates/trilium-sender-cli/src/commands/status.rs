use trilium_sender_core::store::SettingsStore;

use crate::commands::common::Connection;
use crate::error::CliError;

pub fn run_status(connection: &Connection) -> Result<(), CliError> {
    let store = connection.open_store()?;
    let config = store.load()?;
    println!("{}", config.setup_status());
    Ok(())
}
