//! Server connection settings model

use std::fmt;

use serde::{Deserialize, Serialize};

use super::label::NoteLabel;

/// Connection settings produced by a successful login.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base address of the Trilium server, e.g. `https://notes.example.com`
    pub address: String,
    /// Token returned by `/api/sender/login`
    pub api_token: String,
    /// Label attached to every created note
    #[serde(default)]
    pub note_label: Option<String>,
}

impl ServerConfig {
    pub fn new(
        address: impl Into<String>,
        api_token: impl Into<String>,
        note_label: Option<String>,
    ) -> Self {
        Self {
            address: address.into(),
            api_token: api_token.into(),
            note_label,
        }
    }

    /// Both the address and the token are present.
    pub fn is_configured(&self) -> bool {
        !self.address.is_empty() && !self.api_token.is_empty()
    }

    /// The configured label, if it is non-empty.
    pub fn label(&self) -> Option<NoteLabel> {
        self.note_label
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(NoteLabel::new)
    }

    pub fn setup_status(&self) -> SetupStatus {
        if self.is_configured() {
            SetupStatus::Configured {
                address: self.address.clone(),
                note_label: self.label().map(|label| label.name),
            }
        } else {
            SetupStatus::NotConfigured
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ServerConfig")
            .field("address", &self.address)
            .field("api_token", &"[REDACTED]")
            .field("note_label", &self.note_label)
            .finish()
    }
}

/// Whether the connection to the server has been set up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupStatus {
    NotConfigured,
    Configured {
        address: String,
        note_label: Option<String>,
    },
}

impl fmt::Display for SetupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "Trilium connection setup isn't finished yet."),
            Self::Configured {
                address,
                note_label,
            } => {
                write!(f, "Trilium connection has been set up for address: {address}.")?;
                if let Some(label) = note_label {
                    write!(f, " New notes are labeled #{label}.")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn is_configured_requires_address_and_token() {
        let samples = ["", " ", "x", "https://notes.example.com"];
        for address in samples {
            for token in samples {
                let config = ServerConfig::new(address, token, None);
                assert_eq!(
                    config.is_configured(),
                    !address.is_empty() && !token.is_empty(),
                    "address={address:?} token={token:?}"
                );
            }
        }
    }

    #[test]
    fn default_config_is_not_configured() {
        assert!(!ServerConfig::default().is_configured());
        assert_eq!(
            ServerConfig::default().setup_status(),
            SetupStatus::NotConfigured
        );
    }

    #[test]
    fn empty_label_is_treated_as_absent() {
        let config = ServerConfig::new("https://n", "t", Some(String::new()));
        assert_eq!(config.label(), None);

        let config = ServerConfig::new("https://n", "t", Some("inbox".to_string()));
        assert_eq!(config.label(), Some(NoteLabel::new("inbox")));
    }

    #[test]
    fn setup_status_message_mentions_address_and_label() {
        let config = ServerConfig::new("https://n.example", "t", Some("inbox".to_string()));
        assert_eq!(
            config.setup_status().to_string(),
            "Trilium connection has been set up for address: https://n.example. New notes are labeled #inbox."
        );
        assert_eq!(
            SetupStatus::NotConfigured.to_string(),
            "Trilium connection setup isn't finished yet."
        );
    }

    #[test]
    fn debug_redacts_token() {
        let config = ServerConfig::new("https://n", "secret-token", None);
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
