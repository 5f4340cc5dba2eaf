//! Note and image submission to a configured Trilium server.

use reqwest::multipart::Form;
use reqwest::{Client, Request, RequestBuilder, StatusCode};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::auth::endpoint_url;
use crate::html::escape_to_html;
use crate::media::{scale_image, UploadBody};
use crate::models::{NoteDraft, NoteLabel, PendingImage, ServerConfig};
use crate::util::local_date_header;
use crate::{Error, Result};

pub const NOTE_PATH: &str = "/api/sender/note";
pub const IMAGE_PATH: &str = "/api/sender/image";

const LOCAL_DATE_HEADER: &str = "X-Local-Date";
const LABELS_HEADER: &str = "X-Labels";
const UPLOAD_FIELD: &str = "upload";
const UPLOAD_FILE_NAME: &str = "image";

/// Why a submission did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionFailure {
    #[error("request could not be sent: {0}")]
    Network(String),
    #[error("server answered HTTP {0}")]
    Status(u16),
    #[error("image could not be processed: {0}")]
    Decode(String),
    #[error("request could not be built: {0}")]
    InvalidRequest(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success {
        /// Bytes of image payload sent; `None` for notes.
        content_length: Option<u64>,
    },
    Failure {
        reason: SubmissionFailure,
    },
}

impl SubmissionResult {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    const fn failure(reason: SubmissionFailure) -> Self {
        Self::Failure { reason }
    }
}

impl From<Error> for SubmissionFailure {
    fn from(error: Error) -> Self {
        match error {
            Error::Decode(message) => Self::Decode(message),
            other => Self::InvalidRequest(other.to_string()),
        }
    }
}

#[derive(Serialize)]
struct CreateNoteRequest<'a> {
    title: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    labels: Option<[NoteLabel; 1]>,
}

/// Sends notes and images using a stored address and API token.
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    client: Client,
    config: ServerConfig,
    note_url: Url,
    image_url: Url,
}

impl SubmissionClient {
    /// Fails with [`Error::NotConfigured`] unless both address and token are set.
    pub fn new(client: Client, config: ServerConfig) -> Result<Self> {
        if !config.is_configured() {
            return Err(Error::NotConfigured);
        }
        let invalid_address =
            || Error::InvalidInput(format!("Invalid server address: {}", config.address));
        let note_url = endpoint_url(&config.address, NOTE_PATH).ok_or_else(invalid_address)?;
        let image_url = endpoint_url(&config.address, IMAGE_PATH).ok_or_else(invalid_address)?;

        Ok(Self {
            client,
            config,
            note_url,
            image_url,
        })
    }

    pub const fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Creates a text note. An empty title is replaced with the default title.
    pub async fn send_note(&self, title: &str, body: &str) -> SubmissionResult {
        let request = match self.build_note_request(&NoteDraft::new(title, body)) {
            Ok(request) => request,
            Err(reason) => return SubmissionResult::failure(reason),
        };
        match self.execute(request).await {
            Ok(()) => SubmissionResult::Success {
                content_length: None,
            },
            Err(reason) => SubmissionResult::failure(reason),
        }
    }

    pub async fn send_draft(&self, draft: &NoteDraft) -> SubmissionResult {
        self.send_note(&draft.title, &draft.content).await
    }

    /// Uploads an image, downscaling JPEGs first.
    pub async fn send_image(&self, image: &PendingImage) -> SubmissionResult {
        let (request, content_length) = match self.build_image_request(image) {
            Ok(prepared) => prepared,
            Err(reason) => return SubmissionResult::failure(reason),
        };
        match self.execute(request).await {
            Ok(()) => SubmissionResult::Success {
                content_length: Some(content_length),
            },
            Err(reason) => SubmissionResult::failure(reason),
        }
    }

    fn build_note_request(
        &self,
        draft: &NoteDraft,
    ) -> std::result::Result<Request, SubmissionFailure> {
        let payload = CreateNoteRequest {
            title: draft.effective_title(),
            content: escape_to_html(&draft.content),
            labels: self.config.label().map(|label| [label]),
        };

        self.authorized(self.client.post(self.note_url.clone()))
            .json(&payload)
            .build()
            .map_err(|error| SubmissionFailure::InvalidRequest(error.to_string()))
    }

    fn build_image_request(
        &self,
        image: &PendingImage,
    ) -> std::result::Result<(Request, u64), SubmissionFailure> {
        let scaled = scale_image(&image.bytes, &image.mime_type)?;
        let body = UploadBody::new(image.mime_type.as_str(), scaled.into_owned());
        let content_length = body.content_length();
        let form = Form::new().part(UPLOAD_FIELD, body.into_part(UPLOAD_FILE_NAME)?);

        let mut builder = self.authorized(self.client.post(self.image_url.clone()));
        if let Some(label) = self.config.label() {
            let labels = label
                .to_header_value()
                .map_err(|error| SubmissionFailure::InvalidRequest(error.to_string()))?;
            builder = builder.header(LABELS_HEADER, labels);
        }

        let request = builder
            .multipart(form)
            .build()
            .map_err(|error| SubmissionFailure::InvalidRequest(error.to_string()))?;
        Ok((request, content_length))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(reqwest::header::AUTHORIZATION, self.config.api_token.as_str())
            .header(LOCAL_DATE_HEADER, local_date_header())
    }

    async fn execute(&self, request: Request) -> std::result::Result<(), SubmissionFailure> {
        let path = request.url().path().to_string();
        let response = self.client.execute(request).await.map_err(|error| {
            tracing::error!("Sending to Trilium failed ({}): {}", path, error);
            SubmissionFailure::Network(error.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::OK {
            tracing::info!("Trilium accepted {}", path);
            Ok(())
        } else {
            tracing::warn!("Trilium rejected {} with HTTP {}", path, status.as_u16());
            Err(SubmissionFailure::Status(status.as_u16()))
        }
    }
}
