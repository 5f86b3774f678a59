//! HTML sanitization and field validation for feed content.
//!
//! Everything that ends up in an [`Article`](crate::feed::Article) passes
//! through here first. Feed bodies are untrusted input; titles lose all
//! markup, summaries keep a small formatting subset, and links must be
//! plain http(s) URLs.

use std::collections::{HashMap, HashSet};

use ammonia::Builder;
use url::Url;

use crate::feed::RawEntry;

/// Formatting tags allowed to survive in article summaries.
const ALLOWED_TAGS: &[&str] = &["p", "br", "strong", "em", "a", "ul", "ol", "li"];

/// Attributes allowed on anchor tags within summaries.
const LINK_ATTRIBUTES: &[&str] = &["href", "title"];

/// Maximum rendered length of an article summary, suffix included.
pub const SUMMARY_MAX_LEN: usize = 300;

const TRUNCATE_SUFFIX: &str = "...";

const UNKNOWN_SOURCE: &str = "Unknown";

/// An entry that passed validation. Title and link are non-empty and the
/// link is a syntactically valid http(s) URL.
#[derive(Debug, Clone)]
pub struct ValidatedEntry {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub published: String,
    pub source: String,
}

/// Remove every tag, keeping only text content. Tag bodies survive, so
/// `<script>alert(1)</script>Hi` becomes `alert(1)Hi`.
pub fn strip_markup(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut builder = Builder::default();
    builder
        .tags(HashSet::new())
        .clean_content_tags(HashSet::new());
    builder.clean(text).to_string()
}

/// Reduce markup to the summary allow-list. Unknown tags are unwrapped
/// rather than deleted, event handlers and non-http(s) URLs are dropped
/// from the attributes that remain.
pub fn clean_markup(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut link_attributes = HashMap::new();
    link_attributes.insert("a", LINK_ATTRIBUTES.iter().copied().collect());

    let mut builder = Builder::default();
    builder
        .tags(ALLOWED_TAGS.iter().copied().collect())
        .generic_attributes(HashSet::new())
        .tag_attributes(link_attributes)
        .url_schemes(["http", "https"].into_iter().collect())
        .link_rel(None)
        .clean_content_tags(HashSet::new());
    builder.clean(text).to_string()
}

/// Accept only absolute http(s) URLs with a host. Returns the trimmed
/// input unchanged on success; no normalization is applied.
pub fn validate_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    let parsed = Url::parse(url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Some(url.to_string()),
        _ => None,
    }
}

/// Truncate to at most `max_len` characters, appending `...` when text
/// was cut. Cuts at the last whitespace inside the window when there is
/// one, and counts characters rather than bytes.
pub fn truncate(text: &str, max_len: usize) -> String {
    truncate_with(text, max_len, TRUNCATE_SUFFIX)
}

pub fn truncate_with(text: &str, max_len: usize, suffix: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    let keep = max_len.saturating_sub(suffix.chars().count());
    let window_end = text
        .char_indices()
        .nth(keep)
        .map(|(index, _)| index)
        .unwrap_or(text.len());
    let window = &text[..window_end];

    let cut = window
        .char_indices()
        .filter(|(_, ch)| ch.is_whitespace())
        .map(|(index, _)| index)
        .last()
        .unwrap_or(window.len());

    format!("{}{}", window[..cut].trim_end(), suffix)
}

/// Validate and sanitize one raw feed entry.
///
/// Entries with a missing or empty title or link are rejected, as are
/// entries whose link fails [`validate_url`] or whose title contains
/// nothing but markup. Everything else comes back normalized: title
/// stripped of tags, summary reduced to the allow-list and truncated,
/// source defaulted to `Unknown`.
pub fn validate_entry(entry: RawEntry) -> Option<ValidatedEntry> {
    let title = entry.title.as_deref().unwrap_or("").trim();
    let link = entry.link.as_deref().unwrap_or("").trim();
    if title.is_empty() || link.is_empty() {
        return None;
    }

    let title = strip_markup(title);
    let title = title.trim();
    if title.is_empty() {
        return None;
    }
    let link = validate_url(link)?;

    let summary = clean_markup(entry.summary.as_deref().unwrap_or(""));
    let summary = truncate(&summary, SUMMARY_MAX_LEN);

    let source = match entry.source.as_deref().map(strip_markup) {
        Some(source) if !source.trim().is_empty() => source,
        _ => UNKNOWN_SOURCE.to_string(),
    };

    Some(ValidatedEntry {
        title: title.to_string(),
        link,
        summary,
        published: entry.published.unwrap_or_default(),
        source,
    })
}
