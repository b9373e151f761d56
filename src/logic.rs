//! Business logic layer - keyword validation and view building

use crate::network::{FetchError, NewsEngine, NewsSource};
use crate::pipeline::clean;
use serde::Serialize;

/// One rendered search result, shared by the console and the web handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsView {
    pub index: usize,
    pub title: String,
    pub description: String,
    pub summary: String,
    pub link: String,
}

/// Trimmed keyword, or `EmptyInput` when nothing is left.
pub fn validate_keyword(input: &str) -> Result<&str, FetchError> {
    let keyword = input.trim();
    if keyword.is_empty() {
        return Err(FetchError::EmptyInput);
    }
    Ok(keyword)
}

/// Fetch, clean and summarize, keeping source order. Indexes start at 1.
pub async fn build_news_view(
    engine: &NewsEngine,
    source: &NewsSource,
    keyword: &str,
    limit: usize,
) -> Vec<NewsView> {
    engine
        .search(keyword, limit, source)
        .await
        .into_iter()
        .map(clean)
        .enumerate()
        .map(|(i, item)| NewsView {
            index: i + 1,
            summary: item.summary(),
            title: item.title,
            description: item.description,
            link: item.link,
        })
        .collect()
}
