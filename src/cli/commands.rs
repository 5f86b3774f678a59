use std::fs;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::feed::aggregator;
use crate::feed::fetcher::FeedFetcher;
use crate::feed::Article;

/// Create the configuration file with the stock feed lineup
pub async fn init(config_path: Option<PathBuf>) -> Result<()> {
    info!("Initializing newspulse configuration");

    let config_file = get_config_file(config_path)?;

    if config_file.exists() {
        warn!("Configuration file already exists: {}", config_file.display());
        println!("✅ Configuration already exists: {}", config_file.display());
        return Ok(());
    }

    if let Some(parent) = config_file.parent() {
        fs::create_dir_all(parent)?;
    }

    let config = Config::default();
    config.save(&config_file)?;

    println!("✅ Created configuration: {}", config_file.display());
    println!(
        "   {} feeds configured. Run 'newspulse fetch' to aggregate them.",
        config.feeds.len()
    );
    Ok(())
}

/// List configured feeds in fetch order
pub async fn feeds(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;

    if config.feeds.is_empty() {
        println!("📋 No feeds configured.");
        println!("   Edit the configuration file to add [[feeds]] entries.");
        return Ok(());
    }

    println!("📋 Configured feeds:");
    for (index, spec) in config.feeds.iter().enumerate() {
        println!("{:>3}. {} ({})", index + 1, spec.name, spec.url);
    }
    Ok(())
}

/// Fetch every configured feed and print the merged timeline
pub async fn fetch(config_path: Option<PathBuf>, json: bool, limit: Option<usize>) -> Result<()> {
    let config = load_config(config_path)?;

    info!("Aggregating {} feeds", config.feeds.len());
    let fetcher = FeedFetcher::new(&config.settings);
    let results = aggregator::fetch_all(&fetcher, &config.feeds).await;

    for result in &results {
        if let Some(error) = &result.error {
            warn!("Feed '{}' failed: {}", result.source, error);
        }
    }

    let total = results.len();
    let failed = results.iter().filter(|r| !r.success).count();

    let mut articles = aggregator::merge_articles(results);
    if let Some(limit) = limit {
        articles.truncate(limit);
    }

    if json {
        print_json(&articles)?;
    } else {
        print_timeline(&articles, total, failed);
    }

    Ok(())
}

fn print_json(articles: &[Article]) -> Result<()> {
    let envelope = serde_json::json!({
        "success": true,
        "count": articles.len(),
        "articles": articles,
    });
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

fn print_timeline(articles: &[Article], total_feeds: usize, failed_feeds: usize) {
    if failed_feeds > 0 {
        println!("⚠️  {} of {} feeds failed", failed_feeds, total_feeds);
    }

    if articles.is_empty() {
        println!("📭 No articles available.");
        return;
    }

    println!("📰 {} articles, newest first:", articles.len());
    println!();

    for article in articles {
        match article.published_at {
            Some(at) => println!(
                "• {} [{}] {}",
                at.format("%Y-%m-%d %H:%M"),
                article.source,
                article.title
            ),
            None => println!("• {:>16} [{}] {}", "undated", article.source, article.title),
        }
        if !article.summary.is_empty() {
            println!("  {}", article.summary);
        }
        println!("  {}", article.link);
        println!();
    }
}

fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    let config_file = get_config_file(config_path)?;
    if !config_file.exists() {
        return Err(Error::NotFound(
            "Configuration file not found. Run 'newspulse init' first.".to_string(),
        ));
    }
    Config::load_with_env(&config_file)
}

fn get_config_file(config_path: Option<PathBuf>) -> Result<PathBuf> {
    match config_path {
        Some(path) => Ok(path),
        None => Config::default_path(),
    }
}

/// Initialize logging based on verbosity flags
pub fn init_logging(debug: bool, verbose: bool) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Logs go to stderr; stdout carries the timeline or JSON payload.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(debug)
        .with_line_number(debug)
        .init();

    debug!("Logging initialized");
    Ok(())
}
