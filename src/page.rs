use reqwest::Url;

use crate::error::{LogError, Result};

const HOST: &str = "adventofcode.com";
const VIEW_PATH: &str = "/leaderboard/private/view/";

/// Where the log is being rendered: the URL of the leaderboard page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    url: Url,
}

impl PageLocation {
    /// Parse an absolute page URL.
    pub fn parse(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| LogError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self { url })
    }

    /// The full page URL, query included.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The URL path, without query or fragment.
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Path of the JSON representation of this page. Doubles as the cache key.
    pub fn resource_key(&self) -> String {
        format!("{}.json", self.path())
    }

    /// Whether the URL matches the glob
    /// `https://adventofcode.com/*/leaderboard/private/view/*`, where `*`
    /// matches any run of characters, slashes and the empty string included.
    pub fn is_private_leaderboard_view(&self) -> bool {
        self.url.scheme() == "https"
            && self.url.host_str() == Some(HOST)
            && self
                .path()
                .strip_prefix('/')
                .is_some_and(|rest| rest.contains(VIEW_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_key() {
        let page =
            PageLocation::parse("https://adventofcode.com/2023/leaderboard/private/view/123456")
                .unwrap();
        assert_eq!(page.path(), "/2023/leaderboard/private/view/123456");
        assert_eq!(
            page.resource_key(),
            "/2023/leaderboard/private/view/123456.json"
        );
    }

    #[test]
    fn test_resource_key_ignores_query() {
        let page = PageLocation::parse(
            "https://adventofcode.com/2023/leaderboard/private/view/123456?order=stars",
        )
        .unwrap();
        assert_eq!(
            page.resource_key(),
            "/2023/leaderboard/private/view/123456.json"
        );
    }

    #[test]
    fn test_activation_pattern() {
        let matching = [
            "https://adventofcode.com/2023/leaderboard/private/view/123456",
            "https://adventofcode.com/2015/leaderboard/private/view/1",
            "https://adventofcode.com/2023/leaderboard/private/view/",
            "https://adventofcode.com/2023/leaderboard/private/view/1/extra",
            "https://adventofcode.com/a/b/leaderboard/private/view/1",
        ];
        for url in matching {
            assert!(
                PageLocation::parse(url).unwrap().is_private_leaderboard_view(),
                "expected {url} to match"
            );
        }

        let other = [
            "https://adventofcode.com/2023/leaderboard",
            "https://adventofcode.com/2023/leaderboard/private",
            "https://adventofcode.com/leaderboard/private/view/123456",
            "https://adventofcode.com/2023/leaderboard/private/view",
            "http://adventofcode.com/2023/leaderboard/private/view/123456",
            "https://example.com/2023/leaderboard/private/view/123456",
        ];
        for url in other {
            assert!(
                !PageLocation::parse(url).unwrap().is_private_leaderboard_view(),
                "expected {url} not to match"
            );
        }
    }

    #[test]
    fn test_invalid_url() {
        let err = PageLocation::parse("not a url").unwrap_err();
        assert!(matches!(err, LogError::InvalidUrl { .. }));
    }
}
