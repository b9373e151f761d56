//! Fetching engine for the RSS search and the keyed search API.
//!
//! Every public fetch is best-effort: transport, status, parse and
//! credential failures are logged with their kind and collapse into an
//! empty result.

use crate::config::Credentials;
use crate::consts::{headers, limits, locale, Source, GOOGLE_NEWS, NAVER_NEWS};
use crate::utils::strip_html;
use chrono::{DateTime, Utc};
use feed_rs::model::Entry;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP: {0}")] Http(#[from] reqwest::Error),
    #[error("Status {0}")] Status(u16),
    #[error("Feed: {0}")] Feed(String),
    #[error("JSON: {0}")] Json(#[from] serde_json::Error),
    #[error("No Key")] NoCredentials,
    #[error("No Keyword")] EmptyInput,
    #[error("Empty")] Empty,
}

/// A fetched record before markup cleanup.
///
/// Keyed API items deserialize straight into this shape; unknown provider
/// fields are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub link: String,
    #[serde(default, rename = "originallink", skip_serializing_if = "Option::is_none")]
    pub original_link: Option<String>,
    #[serde(default, rename = "pubDate", skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
}

impl RawItem {
    pub fn new(title: String, description: String, link: String) -> Self {
        Self { title, description, link, original_link: None, published: None }
    }
    fn with_published(mut self, published: Option<String>) -> Self { self.published = published; self }
}

/// Providers send `null` for absent text fields; treat it like a missing key.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
struct KeyedResponse {
    #[serde(default)]
    items: Vec<RawItem>,
}

/// Which search backend to query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsSource {
    Rss,
    Keyed(Credentials),
}

impl NewsSource {
    /// Keyed search when credentials are configured, RSS otherwise.
    pub fn select(credentials: Option<Credentials>) -> Self {
        match credentials {
            Some(creds) => NewsSource::Keyed(creds),
            None => NewsSource::Rss,
        }
    }

    pub fn source(&self) -> &'static Source {
        match self {
            NewsSource::Rss => &GOOGLE_NEWS,
            NewsSource::Keyed(_) => &NAVER_NEWS,
        }
    }
}

pub struct NewsEngine {
    client: Client,
    rss_url: String,
    keyed_url: String,
}

impl NewsEngine {
    pub fn new() -> Result<Arc<Self>, FetchError> {
        Self::with_endpoints(GOOGLE_NEWS.url, NAVER_NEWS.url)
    }

    /// Engine against custom base URLs (proxies, test servers).
    pub fn with_endpoints(
        rss_url: impl Into<String>,
        keyed_url: impl Into<String>,
    ) -> Result<Arc<Self>, FetchError> {
        let client = Client::builder()
            .user_agent(headers::USER_AGENT)
            .timeout(Duration::from_secs(limits::REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Arc::new(Self {
            client,
            rss_url: rss_url.into(),
            keyed_url: keyed_url.into(),
        }))
    }

    pub async fn search(&self, keyword: &str, limit: usize, source: &NewsSource) -> Vec<RawItem> {
        log::info!("Searching {} for '{}' (limit {})", source.source().name, keyword, limit);
        match source {
            NewsSource::Rss => self.fetch_rss(keyword, limit).await,
            NewsSource::Keyed(creds) => self.fetch_keyed_with(keyword, limit, creds).await,
        }
    }

    /// RSS search, at most `limit` items in feed order.
    ///
    /// A direct read of the feed is tried first; when it yields no entries
    /// for any reason, one explicit GET with its own timeout is made.
    pub async fn fetch_rss(&self, keyword: &str, limit: usize) -> Vec<RawItem> {
        let url = self.rss_search_url(keyword);

        let entries = match self.read_feed(&url).await {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("{}: direct read gave nothing ({}), retrying", GOOGLE_NEWS.name, e);
                match self.read_feed_fallback(&url).await {
                    Ok(entries) => entries,
                    Err(e) => {
                        log::warn!("{}: fallback failed: {}", GOOGLE_NEWS.name, e);
                        return Vec::new();
                    }
                }
            }
        };

        let items = collect_entries(entries, limit);
        log::debug!("{}: {} items for '{}'", GOOGLE_NEWS.name, items.len(), keyword);
        items
    }

    /// Keyed search. Blank credentials short-circuit without any request.
    pub async fn fetch_keyed(
        &self,
        keyword: &str,
        count: usize,
        client_id: &str,
        client_secret: &str,
    ) -> Vec<RawItem> {
        match Credentials::new(client_id, client_secret) {
            Some(creds) => self.fetch_keyed_with(keyword, count, &creds).await,
            None => {
                log::warn!("{}: {}", NAVER_NEWS.name, FetchError::NoCredentials);
                Vec::new()
            }
        }
    }

    async fn fetch_keyed_with(&self, keyword: &str, count: usize, creds: &Credentials) -> Vec<RawItem> {
        match self.request_keyed(keyword, count, creds).await {
            Ok(items) => items,
            Err(e) => {
                log::warn!("{}: {}", NAVER_NEWS.name, e);
                Vec::new()
            }
        }
    }

    fn rss_search_url(&self, keyword: &str) -> String {
        format!(
            "{}?q={}&hl={}&gl={}&ceid={}",
            self.rss_url,
            urlencoding::encode(keyword),
            locale::HL,
            locale::GL,
            locale::CEID
        )
    }

    async fn read_feed(&self, url: &str) -> Result<Vec<Entry>, FetchError> {
        let res = self.client.get(url).header(ACCEPT, headers::ACCEPT_RSS).send().await?;
        let bytes = res.bytes().await?;
        parse_entries(&bytes)
    }

    async fn read_feed_fallback(&self, url: &str) -> Result<Vec<Entry>, FetchError> {
        let res = self
            .client
            .get(url)
            .header(ACCEPT, headers::ACCEPT_RSS)
            .timeout(Duration::from_secs(limits::RSS_FALLBACK_TIMEOUT_SECS))
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(FetchError::Status(res.status().as_u16()));
        }
        let bytes = res.bytes().await?;
        parse_entries(&bytes)
    }

    async fn request_keyed(
        &self,
        keyword: &str,
        count: usize,
        creds: &Credentials,
    ) -> Result<Vec<RawItem>, FetchError> {
        let display = count.to_string();
        let res = self
            .client
            .get(&self.keyed_url)
            .header(headers::NAVER_CLIENT_ID, creds.client_id())
            .header(headers::NAVER_CLIENT_SECRET, creds.client_secret())
            .query(&[("query", keyword), ("display", display.as_str()), ("sort", "date")])
            .timeout(Duration::from_secs(limits::KEYED_TIMEOUT_SECS))
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(FetchError::Status(res.status().as_u16()));
        }
        let bytes = res.bytes().await?;
        let body: KeyedResponse = serde_json::from_slice(&bytes)?;
        Ok(body.items)
    }
}

fn parse_entries(bytes: &[u8]) -> Result<Vec<Entry>, FetchError> {
    let feed = feed_rs::parser::parse(bytes).map_err(|e| FetchError::Feed(e.to_string()))?;
    if feed.entries.is_empty() {
        return Err(FetchError::Empty);
    }
    Ok(feed.entries)
}

/// Entries with neither title nor link are skipped and do not count
/// toward `limit`.
fn collect_entries(entries: Vec<Entry>, limit: usize) -> Vec<RawItem> {
    let mut items = Vec::new();
    for entry in entries {
        if items.len() >= limit { break; }

        let title = entry.title.map(|t| t.content.trim().to_string()).unwrap_or_default();
        let link = entry.links.first().map(|l| l.href.trim().to_string()).unwrap_or_default();
        if title.is_empty() && link.is_empty() { continue; }

        let raw = entry
            .summary
            .map(|s| s.content)
            .filter(|s| !s.is_empty())
            .or_else(|| entry.content.and_then(|c| c.body))
            .unwrap_or_default();
        let published = entry.published.map(|d: DateTime<Utc>| d.to_rfc2822());

        items.push(RawItem::new(title, strip_html(&raw), link).with_published(published));
    }
    items
}
