//! Normalizer and summarizer.
//!
//! `clean` turns a fetched [`RawItem`] into a [`CleanItem`]; `summarize`
//! derives a one-line synopsis from a clean description. Both are pure.

use crate::consts::limits;
use crate::network::RawItem;
use crate::utils::{clean_text, strip_bold, truncate_text};
use serde::Serialize;

/// A news record with bold markers and entities removed, single-spaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanItem {
    pub title: String,
    pub description: String,
    pub link: String,
}

impl CleanItem {
    /// Synopsis with the default maximum length.
    pub fn summary(&self) -> String {
        summarize(&self.title, &self.description, limits::SUMMARY_MAX_LEN)
    }
}

impl From<CleanItem> for RawItem {
    fn from(item: CleanItem) -> Self {
        RawItem::new(item.title, item.description, item.link)
    }
}

/// Normalize a raw record. Idempotent.
pub fn clean(raw: RawItem) -> CleanItem {
    CleanItem {
        title: strip_bold(&raw.title),
        description: clean_text(&raw.description),
        link: raw.link,
    }
}

/// First sentence of `description`, at most `max_len` characters.
///
/// Falls back to `title` when the description is empty after cleanup.
/// The full-width period `。` wins over `.` whenever it appears. A segment
/// longer than `max_len` is cut to `max_len - 1` characters plus `…`.
pub fn summarize(title: &str, description: &str, max_len: usize) -> String {
    let text = clean_text(description);
    if text.is_empty() {
        return title.to_string();
    }

    let first_sentence = if text.contains('。') {
        text.split('。').next().unwrap_or_default()
    } else if text.contains('.') {
        text.split('.').next().unwrap_or_default()
    } else {
        text.as_str()
    };

    truncate_text(first_sentence.trim(), max_len)
}
