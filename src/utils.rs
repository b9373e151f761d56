use once_cell::sync::Lazy;
use regex::Regex;

/// Bold markers and entities that keyed providers mix into text fields.
pub const MARKUP_TOKENS: [&str; 7] = ["<b>", "</b>", "&quot;", "&apos;", "&lt;", "&gt;", "&amp;"];

const BOLD_TAGS: [&str; 2] = ["<b>", "</b>"];

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

/// Replace every markup token with a single space.
pub fn replace_markup_tokens(text: &str) -> String {
    MARKUP_TOKENS
        .iter()
        .fold(text.to_string(), |acc, token| acc.replace(token, " "))
}

/// Collapse any whitespace run (newlines included) to one space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Token replacement followed by whitespace collapse.
pub fn clean_text(text: &str) -> String {
    collapse_whitespace(&replace_markup_tokens(text))
}

/// Remove every `<...>` tag (replaced by a space) and collapse whitespace.
/// Feed summaries carry arbitrary markup, not only bold markers.
pub fn strip_html(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    collapse_whitespace(&TAG_RE.replace_all(text, " "))
}

/// Drop bold markers from a title, leaving every other character alone.
///
/// Repeats until nothing changes so inputs like `<<b>b>` cannot leave a
/// marker behind.
pub fn strip_bold(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = BOLD_TAGS
            .iter()
            .fold(current.clone(), |acc, tag| acc.replace(tag, ""));
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Cut `s` to at most `max_chars` characters, the last one being `…`.
pub fn truncate_text(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    out.truncate(out.trim_end().len());
    out.push('…');
    out
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
