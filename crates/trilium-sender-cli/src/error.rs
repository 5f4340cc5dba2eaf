use std::io;

use thiserror::Error;
use trilium_sender_core::auth::{LoginFailure, LoginField, ValidationError};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] trilium_sender_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("{field}: {0}", field = field_label(.0.field()))]
    Validation(#[from] ValidationError),
    #[error("{field}: {0}", field = field_label(.0.field()))]
    Login(LoginFailure),
    #[error("No note content provided")]
    EmptyContent,
    #[error("Editor command failed: {0}")]
    EditorFailed(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Could not determine the MIME type of {0}; pass --mime-type")]
    UnknownMimeType(String),
    #[error("Trilium Sender is not configured. Run `trilium-sender login` first.")]
    NotConfigured,
    #[error("Sending to Trilium failed: {0}")]
    SendFailed(String),
}

const fn field_label(field: LoginField) -> &'static str {
    match field {
        LoginField::Address => "--address",
        LoginField::Username => "--username",
        LoginField::Password => "--password",
    }
}
