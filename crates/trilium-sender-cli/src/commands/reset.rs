use trilium_sender_core::store::SettingsStore;

use crate::commands::common::Connection;
use crate::error::CliError;

pub fn run_reset(connection: &Connection) -> Result<(), CliError> {
    let store = connection.open_store()?;
    store.clear()?;
    println!("Forgot stored Trilium connection ({})", store.path().display());
    Ok(())
}
