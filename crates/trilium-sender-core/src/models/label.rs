//! Note label model

use serde::{Deserialize, Serialize};

/// A label attached to a created note.
///
/// The server accepts a list of name/value pairs; only a single valueless
/// label is ever sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteLabel {
    pub name: String,
    pub value: String,
}

impl NoteLabel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
        }
    }

    /// JSON list carried in the `X-Labels` header of image uploads.
    pub fn to_header_value(&self) -> serde_json::Result<String> {
        serde_json::to_string(std::slice::from_ref(self))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn header_value_is_single_element_list() {
        let label = NoteLabel::new("fromPhone");
        assert_eq!(
            label.to_header_value().unwrap(),
            r#"[{"name":"fromPhone","value":""}]"#
        );
    }
}
