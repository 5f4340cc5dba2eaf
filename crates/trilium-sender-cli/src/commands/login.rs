use trilium_sender_core::auth::{AuthClient, LoginResult};
use trilium_sender_core::store::SettingsStore;
use trilium_sender_core::util::normalize_text_option;
use trilium_sender_core::ServerConfig;

use crate::commands::common::Connection;
use crate::error::CliError;

pub struct LoginForm<'a> {
    pub address: &'a str,
    pub username: &'a str,
    pub password: &'a str,
    pub label: Option<String>,
}

pub async fn run_login(connection: &Connection, form: LoginForm<'_>) -> Result<(), CliError> {
    let store = connection.open_store()?;
    let auth = AuthClient::new(connection.client()?);
    let config = login_and_save(&auth, &store, form).await?;

    println!("{}", config.setup_status());
    Ok(())
}

/// Logs in and persists the address, token and label together. Nothing is
/// written unless the server hands out a token.
pub async fn login_and_save(
    auth: &AuthClient,
    store: &impl SettingsStore,
    form: LoginForm<'_>,
) -> Result<ServerConfig, CliError> {
    match auth
        .login(form.address, form.username, form.password)
        .await?
    {
        LoginResult::Success { token } => {
            let config =
                ServerConfig::new(form.address, token, normalize_text_option(form.label));
            store.save(&config)?;
            tracing::info!("Stored Trilium connection for {}", config.address);
            Ok(config)
        }
        LoginResult::Failure { kind } => Err(CliError::Login(kind)),
    }
}
