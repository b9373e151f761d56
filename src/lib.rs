//! News Brief - keyword news search with naive first-sentence summaries.
//!
//! Pipeline: [`network::NewsEngine`] fetches raw items, [`pipeline::clean`]
//! normalizes them, [`pipeline::summarize`] derives a synopsis, and the
//! [`console`] / [`web`] front ends render the result.

pub mod config;
pub mod console;
pub mod consts;
pub mod logic;
pub mod network;
pub mod pipeline;
pub mod utils;
pub mod web;

pub use config::{Cli, Command, Credentials, Settings};
pub use logic::{build_news_view, NewsView};
pub use network::{FetchError, NewsEngine, NewsSource, RawItem};
pub use pipeline::{clean, summarize, CleanItem};
