use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::feed::FeedSpec;

/// On-disk configuration: an ordered feed list plus fetch settings.
///
/// Feed order matters. Results are reported in configuration order and
/// merge ties resolve by it, so feeds live in a list rather than a map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_feeds")]
    pub feeds: Vec<FeedSpec>,

    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Per-feed fetch deadline in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Most entries taken from a single feed.
    #[serde(default = "default_max_articles")]
    pub max_articles: usize,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|_| Error::NotFound(path.as_ref().display().to_string()))?;

        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for spec in &self.feeds {
            if spec.name.trim().is_empty() {
                return Err(Error::Config("Feed name cannot be empty".to_string()));
            }

            let parsed = url::Url::parse(&spec.url)
                .map_err(|_| Error::InvalidUrl(spec.url.clone()))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(Error::InvalidUrl(spec.url.clone()));
            }
        }

        if self.settings.timeout == 0 {
            return Err(Error::Config("Timeout must be greater than 0".to_string()));
        }

        if self.settings.max_articles == 0 {
            return Err(Error::Config("Max articles must be greater than 0".to_string()));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(timeout) = std::env::var("NEWSPULSE_TIMEOUT") {
            if let Ok(val) = timeout.parse() {
                self.settings.timeout = val;
            }
        }

        if let Ok(max_articles) = std::env::var("NEWSPULSE_MAX_ARTICLES") {
            if let Ok(val) = max_articles.parse() {
                self.settings.max_articles = val;
            }
        }
    }

    pub fn default() -> Self {
        Self {
            feeds: default_feeds(),
            settings: Settings::default(),
        }
    }

    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("newspulse"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            max_articles: default_max_articles(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

fn default_max_articles() -> usize {
    10
}

fn default_user_agent() -> String {
    format!("newspulse/{}", env!("CARGO_PKG_VERSION"))
}

/// The stock feed lineup used until the user edits their config.
fn default_feeds() -> Vec<FeedSpec> {
    [
        ("BBC News", "https://feeds.bbci.co.uk/news/rss.xml"),
        ("The Guardian", "https://www.theguardian.com/uk/rss"),
        ("Sky News", "https://feeds.skynews.com/feeds/rss/home.xml"),
        ("Al Jazeera", "https://www.aljazeera.com/xml/rss/all.xml"),
        ("TechCrunch", "https://techcrunch.com/feed/"),
        ("Wired", "https://www.wired.com/feed/rss"),
        ("The Verge", "https://www.theverge.com/rss/index.xml"),
        ("NASA", "https://www.nasa.gov/rss/dyn/breaking_news.rss"),
        ("CNN", "http://rss.cnn.com/rss/edition.rss"),
        ("NPR", "https://www.npr.org/rss/rss.php?id=1001"),
    ]
    .into_iter()
    .map(|(name, url)| FeedSpec::new(name, url))
    .collect()
}
