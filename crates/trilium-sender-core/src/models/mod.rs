//! Data models for Trilium Sender

mod draft;
mod label;
mod settings;

pub use draft::{NoteDraft, PendingImage, DEFAULT_NOTE_TITLE};
pub use label::NoteLabel;
pub use settings::{ServerConfig, SetupStatus};
