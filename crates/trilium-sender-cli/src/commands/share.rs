use trilium_sender_core::NoteDraft;

use crate::commands::common::{resolve_note_content, Connection};
use crate::commands::note::send_draft;
use crate::error::CliError;

pub async fn run_share(
    connection: &Connection,
    subject: Option<&str>,
    referrer: Option<&str>,
    text_parts: &[String],
) -> Result<(), CliError> {
    let client = connection.submission_client()?;
    let text = resolve_note_content(text_parts)?;
    let draft = NoteDraft::from_shared_text(subject, &text, referrer);
    send_draft(&client, &draft).await
}
