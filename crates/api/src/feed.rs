//! Atom 1.0 rendering of journal listings.

use std::collections::HashMap;
use std::fmt::{self, Write};

use chrono::SecondsFormat;
use issuelog_core::journal::Journal;
use issuelog_core::types::{DbId, Timestamp};

/// Content type of rendered feeds.
pub const ATOM_CONTENT_TYPE: &str = "application/atom+xml; charset=utf-8";

/// One `<entry>` of a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomEntry {
    pub id: String,
    pub title: String,
    pub link: String,
    pub author: String,
    pub updated: Timestamp,
    pub content: String,
}

/// Build entries for `journals`. `subjects` maps issue ids to subjects.
pub fn journal_entries(
    journals: &[Journal],
    subjects: &HashMap<DbId, String>,
    public_url: &str,
) -> Vec<AtomEntry> {
    journals
        .iter()
        .map(|j| {
            let link = format!("{public_url}/issues/{}#change-{}", j.issue_id, j.id);
            let title = match subjects.get(&j.issue_id) {
                Some(subject) => format!("{subject} (#{})", j.issue_id),
                None => format!("Issue #{}", j.issue_id),
            };
            AtomEntry {
                id: link.clone(),
                title,
                link,
                author: j.author_name.clone(),
                updated: j.created_at,
                content: j.notes.clone(),
            }
        })
        .collect()
}

/// Render a complete Atom document.
///
/// The feed's `updated` is the newest entry timestamp, or now when empty.
pub fn render(title: &str, feed_url: &str, entries: &[AtomEntry]) -> Result<String, fmt::Error> {
    let updated = entries
        .iter()
        .map(|e| e.updated)
        .max()
        .unwrap_or_else(chrono::Utc::now);

    let mut xml = String::new();
    write_feed(&mut xml, title, feed_url, updated, entries)?;
    Ok(xml)
}

fn write_feed(
    out: &mut String,
    title: &str,
    feed_url: &str,
    updated: Timestamp,
    entries: &[AtomEntry],
) -> fmt::Result {
    writeln!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    writeln!(out, "<feed xmlns=\"http://www.w3.org/2005/Atom\">")?;
    writeln!(out, "  <title>{}</title>", escape_xml(title))?;
    writeln!(out, "  <link rel=\"self\" href=\"{}\"/>", escape_xml(feed_url))?;
    writeln!(out, "  <id>{}</id>", escape_xml(feed_url))?;
    writeln!(out, "  <updated>{}</updated>", format_time(updated))?;

    for entry in entries {
        writeln!(out, "  <entry>")?;
        writeln!(out, "    <title>{}</title>", escape_xml(&entry.title))?;
        writeln!(out, "    <link rel=\"alternate\" href=\"{}\"/>", escape_xml(&entry.link))?;
        writeln!(out, "    <id>{}</id>", escape_xml(&entry.id))?;
        writeln!(out, "    <updated>{}</updated>", format_time(entry.updated))?;
        writeln!(out, "    <author><name>{}</name></author>", escape_xml(&entry.author))?;
        writeln!(out, "    <content type=\"text\">{}</content>", escape_xml(&entry.content))?;
        writeln!(out, "  </entry>")?;
    }

    writeln!(out, "</feed>")
}

fn format_time(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Escape the five XML special characters.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
