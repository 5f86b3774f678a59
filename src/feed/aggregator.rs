use crate::feed::fetcher::FeedFetcher;
use crate::feed::{Article, FeedResult, FeedSpec};
use futures::future;
use tracing::info;

/// Fetch every feed concurrently, one request per spec.
///
/// Results come back in the same order as `specs` regardless of which
/// feeds finish first, and a failed feed occupies its slot as a failed
/// result instead of aborting the batch.
pub async fn fetch_all(fetcher: &FeedFetcher, specs: &[FeedSpec]) -> Vec<FeedResult> {
    if specs.is_empty() {
        return Vec::new();
    }

    info!("Fetching {} feeds concurrently", specs.len());
    let fetches = specs.iter().map(|spec| fetcher.fetch(spec));
    future::join_all(fetches).await
}

/// Flatten successful results into a single list, newest first.
///
/// The sort is stable and descending on the parsed publication date.
/// Undated articles compare lowest and therefore sink to the end, and
/// equal dates keep the order the feeds were configured in.
pub fn merge_articles(results: Vec<FeedResult>) -> Vec<Article> {
    let mut articles: Vec<Article> = results
        .into_iter()
        .filter(|result| result.success)
        .flat_map(|result| result.articles)
        .collect();

    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    articles
}
