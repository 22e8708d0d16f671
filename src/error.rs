use ::scraper::error::SelectorErrorKind;

/// All errors that can occur while producing a leaderboard log.
#[derive(thiserror::Error, Debug)]
pub enum LogError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// A leaderboard snapshot or cache record is not valid JSON of the expected shape.
    #[error("failed to decode {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    /// Reading or writing a cache entry failed.
    #[error("storage access failed for {key}: {source}")]
    Storage {
        key: String,
        source: std::io::Error,
    },

    /// A page URL, or a URL derived from it, could not be parsed.
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The location is not a private leaderboard view.
    #[error("not a private leaderboard page: {url}")]
    UnsupportedPage { url: String },

    /// A date or time format string contains an unsupported specifier.
    #[error("invalid date/time format {format:?}")]
    InvalidFormat { format: String },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// The page has no element to append the log to.
    #[error("no <{tag}> element found on the page")]
    ContainerNotFound { tag: String },
}

impl<'a> From<SelectorErrorKind<'a>> for LogError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        LogError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LogError>;
