use feed_rs::parser as feed_parser;
use tracing::warn;

use crate::feed::RawEntry;

/// Pull up to `max_entries` raw entries out of a feed body.
///
/// A body that does not parse as RSS or Atom is treated as an empty
/// feed rather than an error; one broken feed must not take down the
/// aggregation, so the parse failure is logged and swallowed here.
pub fn extract_entries(body: &[u8], feed_name: &str, max_entries: usize) -> Vec<RawEntry> {
    let feed = match feed_parser::parse(body) {
        Ok(feed) => feed,
        Err(e) => {
            warn!("Failed to parse feed '{}', treating as empty: {}", feed_name, e);
            return Vec::new();
        }
    };

    feed.entries
        .into_iter()
        .take(max_entries)
        .map(|entry| {
            let summary = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body));

            RawEntry {
                title: entry.title.map(|t| t.content),
                link: entry.links.first().map(|l| l.href.clone()),
                summary,
                published: entry.published.or(entry.updated).map(|d| d.to_rfc2822()),
                source: Some(feed_name.to_string()),
            }
        })
        .collect()
}
