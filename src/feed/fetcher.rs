use crate::config::Settings;
use crate::error::{Error, Result};
use crate::feed::{parser, Article, FeedResult, FeedSpec};
use crate::sanitize;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error, info};

/// Fetches one feed over HTTP and turns it into a [`FeedResult`].
///
/// Fetch failures never escape as errors. Each feed is an independent
/// source; a timeout, bad status, or transport problem is recorded on
/// the per-feed result so the other feeds can still be aggregated.
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    client: Client,
    timeout_duration: Duration,
    max_articles: usize,
    user_agent: String,
}

impl Default for FeedFetcher {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl FeedFetcher {
    pub fn new(settings: &Settings) -> Self {
        // No client-level timeout: the per-fetch deadline below is the
        // only one, so an expiry always reports as "Timeout".
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .gzip(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            timeout_duration: Duration::from_secs(settings.timeout),
            max_articles: settings.max_articles,
            user_agent: settings.user_agent.clone(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_duration = timeout;
        self
    }

    pub fn with_max_articles(mut self, max_articles: usize) -> Self {
        self.max_articles = max_articles;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Fetch, parse, and sanitize a single feed.
    ///
    /// The deadline covers the whole exchange, response body included.
    /// Entries that fail validation are dropped without failing the
    /// feed, and an unparseable body counts as an empty feed.
    pub async fn fetch(&self, spec: &FeedSpec) -> FeedResult {
        debug!("Fetching feed '{}' from {}", spec.name, spec.url);

        let outcome = timeout(self.timeout_duration, self.fetch_body(&spec.url))
            .await
            .unwrap_or(Err(Error::Timeout));

        let body = match outcome {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to fetch feed '{}': {}", spec.name, e);
                return FeedResult::failed(spec.name.clone(), spec.url.clone(), e.to_string());
            }
        };

        debug!("Downloaded {} bytes for feed '{}'", body.len(), spec.name);

        let articles: Vec<Article> = parser::extract_entries(&body, &spec.name, self.max_articles)
            .into_iter()
            .filter_map(sanitize::validate_entry)
            .map(Article::from_validated)
            .collect();

        info!("Feed '{}' yielded {} articles", spec.name, articles.len());
        FeedResult::ok(spec.name.clone(), spec.url.clone(), articles)
    }

    async fn fetch_body(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/rss+xml, application/atom+xml, application/xml, text/xml, */*")
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::HttpStatus(status.as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
