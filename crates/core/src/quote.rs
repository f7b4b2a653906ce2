//! Reply quoting for issue descriptions and journal notes.
//!
//! The quoted text is trimmed, `<pre>` blocks are collapsed to `[...]`, and
//! every line is prefixed with [`QUOTE_MARKER`]. The result ends with a blank
//! line so the reply can be typed below it.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Prefix placed before every quoted line.
pub const QUOTE_MARKER: &str = "> ";

/// Placeholder replacing a `<pre>...</pre>` block in quoted text.
pub const PRE_PLACEHOLDER: &str = "[...]";

/// Non-greedy `<pre>` block, `.` matching newlines.
static PRE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<pre>.*?</pre>").expect("valid regex"));

/// Any of the three line endings, `\r\n` first so it counts once.
static LINE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\r|\n").expect("valid regex"));

/// Quote an issue description: `"<author> wrote:"` followed by the quote.
pub fn quote_issue(author: &str, description: Option<&str>) -> String {
    quote(&format!("{author} wrote:"), description.unwrap_or_default())
}

/// Quote journal notes: `"<author> wrote in #note-<indice>:"` followed by
/// the quote. `indice` is the 1-based position of the journal in its issue.
pub fn quote_journal(author: &str, indice: usize, notes: &str) -> String {
    quote(&format!("{author} wrote in #note-{indice}:"), notes)
}

fn quote(header: &str, text: &str) -> String {
    let text = collapse_pre_blocks(text.trim());
    let mut content = String::with_capacity(header.len() + text.len() + 8);
    content.push_str(header);
    for line in LINE_BREAK_RE.split(&text) {
        content.push('\n');
        content.push_str(QUOTE_MARKER);
        content.push_str(line);
    }
    content.push_str("\n\n");
    content
}

/// Replace every `<pre>...</pre>` block (across lines) with [`PRE_PLACEHOLDER`].
fn collapse_pre_blocks(text: &str) -> Cow<'_, str> {
    PRE_BLOCK_RE.replace_all(text, PRE_PLACEHOLDER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_issue_description() {
        let content = quote_issue("John Smith", Some("Unable to print recipes"));
        assert_eq!(content, "John Smith wrote:\n> Unable to print recipes\n\n");
    }

    #[test]
    fn quotes_journal_notes_with_indice() {
        let content = quote_journal("Redmine Admin", 1, "Journal notes");
        assert_eq!(
            content,
            "Redmine Admin wrote in #note-1:\n> Journal notes\n\n"
        );
    }

    #[test]
    fn prefixes_every_line_for_any_line_ending() {
        let content = quote_issue("A", Some("one\r\ntwo\rthree\nfour"));
        assert_eq!(content, "A wrote:\n> one\n> two\n> three\n> four\n\n");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let content = quote_issue("A", Some("\n\n  text  \n"));
        assert_eq!(content, "A wrote:\n> text\n\n");
    }

    #[test]
    fn missing_description_quotes_empty_line() {
        assert_eq!(quote_issue("A", None), "A wrote:\n> \n\n");
    }

    #[test]
    fn collapses_pre_blocks() {
        let content = quote_issue("A", Some("before <pre>\ncode\n</pre> after <pre>x</pre>"));
        assert_eq!(content, "A wrote:\n> before [...] after [...]\n\n");
    }

    #[test]
    fn blank_lines_inside_quote_keep_their_marker() {
        let content = quote_journal("A", 3, "first\r\n\r\nsecond");
        assert_eq!(content, "A wrote in #note-3:\n> first\n> \n> second\n\n");
    }

    #[test]
    fn unterminated_pre_is_kept() {
        assert_eq!(collapse_pre_blocks("a <pre> b"), "a <pre> b");
    }
}
