use reqwest::Url;
use tracing::{debug, instrument};

use crate::accessor::LeaderboardSource;
use crate::error::{LogError, Result};
use crate::model::Leaderboard;

const BASE_URL: &str = "https://adventofcode.com";

/// HTTP access to adventofcode.com.
///
/// `AocClient` wraps a [`reqwest::Client`]. Private leaderboards are only
/// served to logged-in users, so callers normally build the inner client
/// with their `session` cookie as a default header.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> aoc_leaderboard_log::Result<()> {
/// use aoc_leaderboard_log::{AocClient, LeaderboardSource};
///
/// let client = AocClient::new();
/// let leaderboard = client
///     .fetch_leaderboard("/2023/leaderboard/private/view/123456.json")
///     .await?;
/// println!("{} members", leaderboard.members.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AocClient {
    http: reqwest::Client,
    base_url: String,
}

impl AocClient {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            http: client,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Send requests to another origin, e.g. a local mirror.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The origin every request path is resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the HTML source of a page, e.g. the leaderboard view itself.
    #[instrument(skip(self))]
    pub async fn get_page_source(&self, path: &str) -> Result<String> {
        let url = self.resolve(path)?;
        self.get_text(url).await
    }

    fn resolve(&self, path: &str) -> Result<Url> {
        Url::parse(&self.base_url)
            .and_then(|base| base.join(path))
            .map_err(|e| LogError::InvalidUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })
    }

    async fn get_text(&self, url: Url) -> Result<String> {
        debug!(url = %url, "fetching");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| LogError::Http {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LogError::UnexpectedStatus {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|e| LogError::ResponseBody {
            url: url.to_string(),
            source: e,
        })
    }
}

impl Default for AocClient {
    fn default() -> Self {
        Self::new()
    }
}

impl LeaderboardSource for AocClient {
    /// Download and decode `<base-url><path>`.
    #[instrument(skip(self))]
    async fn fetch_leaderboard(&self, path: &str) -> Result<Leaderboard> {
        let url = self.resolve(path)?;
        let body = self.get_text(url.clone()).await?;
        serde_json::from_str(&body).map_err(|e| LogError::Json {
            context: format!("leaderboard from {url}"),
            source: e,
        })
    }
}
