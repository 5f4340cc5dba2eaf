//! Uploadable request bodies built from a content type and a byte source.

use std::io::Read;

use reqwest::multipart::Part;

use crate::models::PendingImage;
use crate::{Error, Result};

/// A fully buffered upload with a known content type and length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadBody {
    content_type: String,
    bytes: Vec<u8>,
}

impl UploadBody {
    pub fn new(content_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Drains `source` into a body.
    pub fn from_reader(content_type: impl Into<String>, mut source: impl Read) -> Result<Self> {
        let mut bytes = Vec::new();
        source.read_to_end(&mut bytes)?;
        Ok(Self::new(content_type, bytes))
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn content_length(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Converts the body into a multipart form part with the given file name.
    pub fn into_part(self, file_name: &str) -> Result<Part> {
        let Self {
            content_type,
            bytes,
        } = self;
        Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(&content_type)
            .map_err(|error| {
                Error::InvalidInput(format!("Invalid content type '{content_type}': {error}"))
            })
    }
}

impl From<UploadBody> for PendingImage {
    fn from(body: UploadBody) -> Self {
        Self::new(body.bytes, body.content_type)
    }
}
