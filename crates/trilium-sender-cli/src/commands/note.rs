use trilium_sender_core::sender::SubmissionClient;
use trilium_sender_core::NoteDraft;

use crate::commands::common::{resolve_note_content, submission_outcome, Connection};
use crate::error::CliError;

pub async fn run_note(
    connection: &Connection,
    title: &str,
    content_parts: &[String],
) -> Result<(), CliError> {
    let client = connection.submission_client()?;
    let content = resolve_note_content(content_parts)?;
    send_draft(&client, &NoteDraft::new(title, content)).await
}

/// Sends a draft and reports the outcome. On failure the draft is echoed to
/// stderr so it can be recovered.
pub async fn send_draft(client: &SubmissionClient, draft: &NoteDraft) -> Result<(), CliError> {
    match submission_outcome(client.send_draft(draft).await) {
        Ok(_) => {
            println!("Note sent: {}", draft.effective_title());
            Ok(())
        }
        Err(error) => {
            eprintln!("Unsent note follows:\n{}", draft.content);
            Err(error)
        }
    }
}
