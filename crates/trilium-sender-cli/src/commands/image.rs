use std::fs::File;
use std::path::Path;

use trilium_sender_core::media::UploadBody;
use trilium_sender_core::sender::SubmissionClient;
use trilium_sender_core::PendingImage;

use crate::commands::common::{submission_outcome, Connection};
use crate::error::CliError;

pub async fn run_image(
    connection: &Connection,
    path: &Path,
    mime_type: Option<&str>,
) -> Result<(), CliError> {
    let client = connection.submission_client()?;
    let image = read_pending_image(path, mime_type)?;
    send_image(&client, &image).await
}

pub async fn send_image(client: &SubmissionClient, image: &PendingImage) -> Result<(), CliError> {
    let content_length = submission_outcome(client.send_image(image).await)?;
    match content_length {
        Some(length) => println!("Image sent ({length} bytes)"),
        None => println!("Image sent"),
    }
    Ok(())
}

pub fn read_pending_image(path: &Path, mime_type: Option<&str>) -> Result<PendingImage, CliError> {
    let mime_type = resolve_mime_type(path, mime_type)?;
    let body = UploadBody::from_reader(mime_type, File::open(path)?)?;
    tracing::debug!(
        "Read {} bytes of {} from {}",
        body.content_length(),
        body.content_type(),
        path.display()
    );
    Ok(PendingImage::from(body))
}

/// An explicit type wins; otherwise it is guessed from the file extension
/// and must be an image type.
pub fn resolve_mime_type(path: &Path, explicit: Option<&str>) -> Result<String, CliError> {
    if let Some(mime_type) = explicit.map(str::trim).filter(|value| !value.is_empty()) {
        return Ok(mime_type.to_string());
    }

    mime_guess::from_path(path)
        .first()
        .filter(|mime| mime.type_() == mime_guess::mime::IMAGE)
        .map(|mime| mime.essence_str().to_string())
        .ok_or_else(|| CliError::UnknownMimeType(path.display().to_string()))
}
