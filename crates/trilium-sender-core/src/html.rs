//! Plain text to HTML fragment conversion for note content.

use std::fmt::Write as _;

const TAB_HTML: &str = "&nbsp; &nbsp; &nbsp;";

/// Converts plain text into the HTML fragment Trilium stores as note content.
///
/// Markup characters are escaped, each newline becomes a `<p>` marker, tabs
/// become three non-breaking spaces, and every second space of a run is
/// emitted as `&nbsp;` so that runs of spaces survive rendering. Characters
/// outside ASCII are written as decimal character references.
pub fn escape_to_html(input: &str) -> String {
    let mut html = String::with_capacity(input.len());
    let mut previous_was_space = false;

    for c in input.chars() {
        if c == ' ' {
            if previous_was_space {
                html.push_str("&nbsp;");
                previous_was_space = false;
                continue;
            }
            previous_was_space = true;
        } else {
            previous_was_space = false;
        }

        match c {
            '<' => html.push_str("&lt;"),
            '>' => html.push_str("&gt;"),
            '&' => html.push_str("&amp;"),
            '"' => html.push_str("&quot;"),
            '\n' => html.push_str("<p>"),
            '\t' => html.push_str(TAB_HTML),
            c if c.is_ascii() => html.push(c),
            c => {
                // Writing into a String cannot fail.
                let _ = write!(html, "&#{};", u32::from(c));
            }
        }
    }

    html
}
