//! Trilium Sender CLI - send notes, shared text and images to a Trilium server.

mod cli;
mod commands;
mod error;
mod settings_store;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::common::Connection;
use crate::commands::completions::run_completions;
use crate::commands::image::run_image;
use crate::commands::login::{run_login, LoginForm};
use crate::commands::note::run_note;
use crate::commands::reset::run_reset;
use crate::commands::share::run_share;
use crate::commands::status::run_status;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::from_default_env();
    let filter = match "trilium_sender=info".parse::<tracing_subscriber::filter::Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let connection = Connection {
        settings_path: cli.settings_path,
        trust: cli.trust,
        cert: cli.cert,
    };

    match cli.command {
        Commands::Login {
            address,
            username,
            password,
            label,
        } => {
            let form = LoginForm {
                address: &address,
                username: &username,
                password: &password,
                label,
            };
            run_login(&connection, form).await?;
        }
        Commands::Note { title, content } => run_note(&connection, &title, &content).await?,
        Commands::Share {
            subject,
            referrer,
            text,
        } => {
            run_share(&connection, subject.as_deref(), referrer.as_deref(), &text).await?;
        }
        Commands::Image { path, mime_type } => {
            run_image(&connection, &path, mime_type.as_deref()).await?;
        }
        Commands::Status => run_status(&connection)?,
        Commands::Reset => run_reset(&connection)?,
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref())?,
    }

    Ok(())
}
