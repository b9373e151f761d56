//! Search endpoints, request headers and limits.
//!
//! Two backends exist: the credential-free RSS search and the keyed JSON
//! search API. Both are fixed at compile time.

use std::fmt;

/// Source type discriminator for the fetching engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// Keyword search returning an RSS/Atom feed
    RssSearch,
    /// Keyword search behind an id/secret credential pair, JSON body
    KeyedApi,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceType::RssSearch => write!(f, "rss"),
            SourceType::KeyedApi => write!(f, "keyed-api"),
        }
    }
}

/// Search endpoint definition with static lifetime
#[derive(Debug, Clone, Copy)]
pub struct Source {
    pub name: &'static str,
    pub url: &'static str,
    pub source_type: SourceType,
}

impl Source {
    const fn new(name: &'static str, url: &'static str, source_type: SourceType) -> Self {
        Self { name, url, source_type }
    }
}

pub const GOOGLE_NEWS: Source = Source::new(
    "Google News",
    "https://news.google.com/rss/search",
    SourceType::RssSearch,
);

pub const NAVER_NEWS: Source = Source::new(
    "Naver News",
    "https://openapi.naver.com/v1/search/news.json",
    SourceType::KeyedApi,
);

/// Locale hints appended to every RSS search (Korean edition)
pub mod locale {
    pub const HL: &str = "ko";
    pub const GL: &str = "KR";
    pub const CEID: &str = "KR:ko";
}

/// HTTP headers. Some feed endpoints reject default client identifiers.
pub mod headers {
    pub const USER_AGENT: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    pub const ACCEPT_RSS: &str =
        "application/rss+xml,application/xml,text/xml;q=0.9,*/*;q=0.8";
    pub const NAVER_CLIENT_ID: &str = "X-Naver-Client-Id";
    pub const NAVER_CLIENT_SECRET: &str = "X-Naver-Client-Secret";
}

/// Limits and thresholds
pub mod limits {
    pub const DEFAULT_RESULT_LIMIT: usize = 10;
    pub const SUMMARY_MAX_LEN: usize = 120;
    pub const REQUEST_TIMEOUT_SECS: u64 = 15;
    pub const RSS_FALLBACK_TIMEOUT_SECS: u64 = 15;
    pub const KEYED_TIMEOUT_SECS: u64 = 10;
    pub const CONSOLE_WRAP_WIDTH: usize = 80;
}
