//! trilium-sender-core - Core library for Trilium Sender
//!
//! This crate contains the models, HTTP clients, and content conversion used
//! to log in to a Trilium server and send notes, shared text, and images to it.

pub mod auth;
pub mod error;
pub mod html;
pub mod media;
pub mod models;
pub mod sender;
pub mod store;
pub mod transport;
pub mod util;

#[cfg(test)]
mod test_support;

pub use error::{Error, Result};
pub use models::{NoteDraft, NoteLabel, PendingImage, ServerConfig};
