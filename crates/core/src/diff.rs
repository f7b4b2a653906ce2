//! Word-level diff of a long-text field change (issue description).
//!
//! Both sides are split into word and whitespace tokens, aligned by longest
//! common subsequence, and emitted as ordered chunks of added, removed and
//! unchanged text.

use serde::{Deserialize, Serialize};

/// Above this many token pairs the alignment table is skipped and the change
/// is reported as a whole-value replacement.
pub const MAX_DIFF_CELLS: usize = 4_000_000;

/// The status of a chunk in a diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    Added,
    Removed,
    Unchanged,
}

impl DiffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Unchanged => "unchanged",
        }
    }
}

impl std::fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A run of text sharing one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffChunk {
    pub status: DiffStatus,
    pub text: String,
}

/// Diff `old` against `new`, returning chunks in display order.
///
/// Adjacent chunks with the same status are merged. Within a changed region
/// removed text comes before added text.
pub fn word_diff(old: &str, new: &str) -> Vec<DiffChunk> {
    let a = tokenize(old);
    let b = tokenize(new);

    let mut ops: Vec<(DiffStatus, &str)> = Vec::with_capacity(a.len() + b.len());
    if a.len().saturating_mul(b.len()) > MAX_DIFF_CELLS {
        ops.extend(a.iter().map(|t| (DiffStatus::Removed, *t)));
        ops.extend(b.iter().map(|t| (DiffStatus::Added, *t)));
    } else {
        align(&a, &b, &mut ops);
    }

    let mut chunks: Vec<DiffChunk> = Vec::new();
    for (status, text) in ops {
        match chunks.last_mut() {
            Some(last) if last.status == status => last.text.push_str(text),
            _ => chunks.push(DiffChunk {
                status,
                text: text.to_string(),
            }),
        }
    }
    chunks
}

/// Split into maximal runs of whitespace and non-whitespace.
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut prev_ws: Option<bool> = None;
    for (i, c) in text.char_indices() {
        let ws = c.is_whitespace();
        if prev_ws.is_some_and(|p| p != ws) {
            tokens.push(&text[start..i]);
            start = i;
        }
        prev_ws = Some(ws);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

fn align<'a>(a: &[&'a str], b: &[&'a str], ops: &mut Vec<(DiffStatus, &'a str)>) {
    let (n, m) = (a.len(), b.len());
    // lcs[i][j] = LCS length of a[i..] and b[j..]
    let mut lcs = vec![vec![0u32; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if a[i] == b[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    let mut added: Vec<&'a str> = Vec::new();
    while i < n || j < m {
        if i < n && j < m && a[i] == b[j] {
            ops.extend(added.drain(..).map(|t| (DiffStatus::Added, t)));
            ops.push((DiffStatus::Unchanged, a[i]));
            i += 1;
            j += 1;
        } else if j < m && (i == n || lcs[i][j + 1] > lcs[i + 1][j]) {
            added.push(b[j]);
            j += 1;
        } else {
            ops.push((DiffStatus::Removed, a[i]));
            i += 1;
        }
    }
    ops.extend(added.drain(..).map(|t| (DiffStatus::Added, t)));
}
