use std::env;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use trilium_sender_core::sender::{SubmissionClient, SubmissionResult};
use trilium_sender_core::store::SettingsStore;
use trilium_sender_core::transport::{build_client, TransportOptions, TrustMode};
use trilium_sender_core::ServerConfig;

use crate::cli::TrustArg;
use crate::error::CliError;
use crate::settings_store::{resolve_settings_path, CliSettingsStore};

/// Flags shared by every subcommand that talks to the server.
#[derive(Debug, Clone)]
pub struct Connection {
    pub settings_path: Option<PathBuf>,
    pub trust: TrustArg,
    pub cert: Option<PathBuf>,
}

impl Connection {
    pub fn open_store(&self) -> Result<CliSettingsStore, CliError> {
        let path = resolve_settings_path(self.settings_path.clone())?;
        Ok(CliSettingsStore::new(path))
    }

    pub fn transport_options(&self) -> Result<TransportOptions, CliError> {
        transport_options(self.trust, self.cert.as_deref())
    }

    pub fn client(&self) -> Result<reqwest::Client, CliError> {
        Ok(build_client(&self.transport_options()?)?)
    }

    /// Loads stored settings and builds a submission client for them.
    pub fn submission_client(&self) -> Result<SubmissionClient, CliError> {
        let config = require_configured(&self.open_store()?)?;
        Ok(SubmissionClient::new(self.client()?, config)?)
    }
}

pub fn transport_options(
    trust: TrustArg,
    cert: Option<&Path>,
) -> Result<TransportOptions, CliError> {
    let trust = match (trust, cert) {
        (TrustArg::Platform, _) => TrustMode::Platform,
        (TrustArg::All, _) => TrustMode::TrustAll,
        (TrustArg::Custom, None) => {
            return Err(CliError::Config(
                "--trust custom requires --cert <PEM>".to_string(),
            ))
        }
        (TrustArg::Custom, Some(path)) => {
            let pem = std::fs::read_to_string(path).map_err(|error| {
                CliError::Config(format!(
                    "Failed to read certificate {}: {error}",
                    path.display()
                ))
            })?;
            TrustMode::CustomCertificate { pem }
        }
    };

    Ok(TransportOptions::with_trust(trust))
}

pub fn require_configured(store: &impl SettingsStore) -> Result<ServerConfig, CliError> {
    let config = store.load()?;
    if config.is_configured() {
        Ok(config)
    } else {
        Err(CliError::NotConfigured)
    }
}

/// Maps a submission outcome onto the command result. The draft stays with
/// the caller on failure so nothing typed is lost.
pub fn submission_outcome(result: SubmissionResult) -> Result<Option<u64>, CliError> {
    match result {
        SubmissionResult::Success { content_length } => Ok(content_length),
        SubmissionResult::Failure { reason } => Err(CliError::SendFailed(reason.to_string())),
    }
}

pub fn resolve_note_content(content_parts: &[String]) -> Result<String, CliError> {
    if let Some(content) = normalize_content(&content_parts.join(" ")) {
        return Ok(content);
    }

    if let Some(content) = read_piped_stdin()? {
        return Ok(content);
    }

    if let Some(content) = capture_editor_input()? {
        return Ok(content);
    }

    Err(CliError::EmptyContent)
}

/// Drops trailing line breaks only; spaces and tabs are part of the note.
/// Whitespace-only input counts as no content.
pub fn normalize_content(content: &str) -> Option<String> {
    if content.trim().is_empty() {
        None
    } else {
        Some(content.trim_end_matches(['\r', '\n']).to_string())
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}

pub fn capture_editor_input() -> Result<Option<String>, CliError> {
    let editor = preferred_editor();
    let temp_file = create_temp_note_file_path();
    std::fs::write(&temp_file, "")?;

    let launch_result = launch_editor(&editor, &temp_file);
    let note_content = std::fs::read_to_string(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);

    launch_result?;
    Ok(normalize_content(&note_content))
}

pub fn launch_editor(editor: &str, file_path: &Path) -> Result<(), CliError> {
    let mut parts = editor.split_whitespace();
    let Some(program) = parts.next() else {
        return Err(CliError::EditorFailed("empty EDITOR command".into()));
    };

    let status = Command::new(program).args(parts).arg(file_path).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(CliError::EditorFailed(format!(
            "`{editor}` exited with status {status}"
        )))
    }
}

pub fn preferred_editor() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string())
}

pub const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

fn create_temp_note_file_path() -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    env::temp_dir().join(format!(
        "trilium-sender-{}-{now}.txt",
        std::process::id()
    ))
}
