pub mod aggregator;
pub mod fetcher;
pub mod parser;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sanitize::ValidatedEntry;

/// A named feed source, in the order it appears in the configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSpec {
    pub name: String,
    pub url: String,
}

impl FeedSpec {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Entry fields as pulled from a parsed feed, before any validation.
#[derive(Debug, Clone, Default)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub published: Option<String>,
    pub source: Option<String>,
}

/// A sanitized article ready for merging and display.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub source: String,
    pub published: String,
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Articles are only built from entries that passed validation, so
    /// title and link are always non-empty here.
    pub fn from_validated(entry: ValidatedEntry) -> Self {
        let published_at = parse_date(&entry.published);
        Self {
            title: entry.title,
            link: entry.link,
            summary: entry.summary,
            source: entry.source,
            published: entry.published,
            published_at,
        }
    }
}

/// Outcome of fetching a single feed. A failed result never carries
/// articles and a successful one never carries an error.
#[derive(Debug, Clone)]
pub struct FeedResult {
    pub source: String,
    pub url: String,
    pub articles: Vec<Article>,
    pub success: bool,
    pub error: Option<String>,
}

impl FeedResult {
    pub fn ok(source: impl Into<String>, url: impl Into<String>, articles: Vec<Article>) -> Self {
        Self {
            source: source.into(),
            url: url.into(),
            articles,
            success: true,
            error: None,
        }
    }

    pub fn failed(source: impl Into<String>, url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            url: url.into(),
            articles: Vec::new(),
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Parse a publication date leniently. Feeds in the wild mix RFC 2822,
/// RFC 3339, and bare date formats; anything unrecognized becomes None
/// rather than an error.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_date_rfc2822() {
        let parsed = parse_date("Wed, 01 Jan 2025 12:00:00 GMT");
        assert_eq!(parsed, Some(Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()));
    }

    #[test]
    fn test_parse_date_rfc2822_with_offset() {
        let parsed = parse_date("Wed, 01 Jan 2025 12:00:00 +0200");
        assert_eq!(parsed, Some(Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap()));
    }

    #[test]
    fn test_parse_date_rfc3339() {
        let parsed = parse_date("2025-01-01T12:00:00Z");
        assert_eq!(parsed, Some(Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()));
    }

    #[test]
    fn test_parse_date_bare_date() {
        let parsed = parse_date("2025-01-01");
        assert_eq!(parsed, Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_parse_date_naive_datetime() {
        let parsed = parse_date("2025-01-01 08:30:00");
        assert_eq!(parsed, Some(Utc.with_ymd_and_hms(2025, 1, 1, 8, 30, 0).unwrap()));
    }

    #[test]
    fn test_parse_date_garbage() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
    }

    #[test]
    fn test_feed_result_ok_has_no_error() {
        let result = FeedResult::ok("BBC News", "https://example.com/rss", Vec::new());
        assert!(result.success);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_feed_result_failed_has_no_articles() {
        let result = FeedResult::failed("BBC News", "https://example.com/rss", "HTTP 500");
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("HTTP 500"));
        assert!(result.articles.is_empty());
    }

    #[test]
    fn test_article_from_validated_parses_date() {
        let entry = ValidatedEntry {
            title: "Title".to_string(),
            link: "https://example.com/a".to_string(),
            summary: String::new(),
            published: "Wed, 01 Jan 2025 12:00:00 GMT".to_string(),
            source: "BBC News".to_string(),
        };

        let article = Article::from_validated(entry);
        assert_eq!(article.published, "Wed, 01 Jan 2025 12:00:00 GMT");
        assert!(article.published_at.is_some());
    }

    #[test]
    fn test_article_from_validated_unparseable_date() {
        let entry = ValidatedEntry {
            title: "Title".to_string(),
            link: "https://example.com/a".to_string(),
            summary: String::new(),
            published: "last tuesday".to_string(),
            source: "BBC News".to_string(),
        };

        let article = Article::from_validated(entry);
        assert_eq!(article.published, "last tuesday");
        assert!(article.published_at.is_none());
    }

    #[test]
    fn test_article_serializes_published_at_as_rfc3339() {
        let entry = ValidatedEntry {
            title: "Title".to_string(),
            link: "https://example.com/a".to_string(),
            summary: String::new(),
            published: "2025-01-01T12:00:00Z".to_string(),
            source: "BBC News".to_string(),
        };

        let value = serde_json::to_value(Article::from_validated(entry)).unwrap();
        assert_eq!(value["published_at"], "2025-01-01T12:00:00Z");
        assert_eq!(value["title"], "Title");
    }

    #[test]
    fn test_article_serializes_missing_date_as_null() {
        let entry = ValidatedEntry {
            title: "Title".to_string(),
            link: "https://example.com/a".to_string(),
            summary: String::new(),
            published: String::new(),
            source: "BBC News".to_string(),
        };

        let value = serde_json::to_value(Article::from_validated(entry)).unwrap();
        assert!(value["published_at"].is_null());
    }
}
