//! Error types for trilium-sender-core

use thiserror::Error;

/// Result type alias using trilium-sender-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trilium-sender-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Image bytes could not be decoded or re-encoded
    #[error("Image decode error: {0}")]
    Decode(String),

    /// Settings persistence error
    #[error("Settings error: {0}")]
    Settings(String),

    /// HTTP client could not be constructed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Server address or API token missing
    #[error("Trilium Sender is not configured. Run `trilium-sender login` first.")]
    NotConfigured,
}
