// src/ingest/types.rs
use serde::{Deserialize, Serialize};

/// Entries read from each feed before merging.
pub const OVER_FETCH: usize = 5;
/// Items kept per news slot. Fixed; not part of the file config.
pub const ITEM_CAP: usize = 3;

pub const NO_TITLE: &str = "No title";
pub const NO_SUMMARY: &str = "No description";
pub const UNKNOWN_DATE: &str = "Unknown date";

/// One normalized headline, ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
    pub link: String,
    pub source: String,
    pub published: String,
}

/// A feed entry as it comes out of the XML, before any defaults or cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub link: Option<String>,
    pub published: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedEndpoint {
    pub url: String,
    /// Shown as `NewsItem::source` for entries from this feed.
    pub name: String,
}

impl FeedEndpoint {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }
}

/// Static definition of one news slot: which feeds, how entries are cleaned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceDef {
    pub name: String,
    pub endpoints: Vec<FeedEndpoint>,
    /// Run titles and summaries through `text::clean`.
    #[serde(default)]
    pub clean_markup: bool,
    /// Character cap for summaries; `None` keeps them whole.
    #[serde(default)]
    pub summary_limit: Option<usize>,
}

impl SourceDef {
    pub fn new(name: impl Into<String>, endpoints: Vec<FeedEndpoint>) -> Self {
        Self {
            name: name.into(),
            endpoints,
            clean_markup: false,
            summary_limit: None,
        }
    }

    pub fn with_clean_markup(mut self, yes: bool) -> Self {
        self.clean_markup = yes;
        self
    }

    pub fn with_summary_limit(mut self, limit: usize) -> Self {
        self.summary_limit = Some(limit);
        self
    }
}
