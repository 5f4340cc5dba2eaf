//! Outgoing note and image payloads

/// Title used when a note is sent without one; the server rejects empty titles.
pub const DEFAULT_NOTE_TITLE: &str = "Note from Android";

const DEFAULT_REFERRER: &str = "Android";

/// A text note waiting to be sent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Pre-fills a draft from text shared by another app.
    ///
    /// A non-empty subject becomes the title; otherwise the title names the
    /// sharing app, falling back to "Android".
    pub fn from_shared_text(subject: Option<&str>, text: &str, referrer: Option<&str>) -> Self {
        let title = match subject.filter(|subject| !subject.is_empty()) {
            Some(subject) => subject.to_string(),
            None => {
                let referrer = referrer
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .unwrap_or(DEFAULT_REFERRER);
                format!("Shared from {referrer}")
            }
        };

        Self::new(title, text)
    }

    /// Title as sent to the server.
    pub fn effective_title(&self) -> &str {
        if self.title.is_empty() {
            DEFAULT_NOTE_TITLE
        } else {
            &self.title
        }
    }
}

/// Image bytes waiting to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl PendingImage {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_title_falls_back_to_default() {
        assert_eq!(NoteDraft::new("", "body").effective_title(), "Note from Android");
        assert_eq!(NoteDraft::new("Groceries", "").effective_title(), "Groceries");
    }

    #[test]
    fn shared_text_prefers_subject() {
        let draft = NoteDraft::from_shared_text(Some("Article"), "https://x", Some("Browser"));
        assert_eq!(draft.title, "Article");
        assert_eq!(draft.content, "https://x");
    }

    #[test]
    fn shared_text_names_referrer_when_subject_missing() {
        let draft = NoteDraft::from_shared_text(Some(""), "text", Some("Browser"));
        assert_eq!(draft.title, "Shared from Browser");

        let draft = NoteDraft::from_shared_text(None, "text", Some("  "));
        assert_eq!(draft.title, "Shared from Android");

        let draft = NoteDraft::from_shared_text(None, "text", None);
        assert_eq!(draft.title, "Shared from Android");
    }
}
