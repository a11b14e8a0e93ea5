// src/ingest/source.rs
use metrics::counter;
use std::collections::HashSet;

use crate::error::FetchError;
use crate::ingest::feed::parse_feed;
use crate::ingest::http::Transport;
use crate::ingest::types::{
    FeedEndpoint, NewsItem, RawEntry, SourceDef, ITEM_CAP, NO_SUMMARY, NO_TITLE, OVER_FETCH,
    UNKNOWN_DATE,
};
use crate::text;

/// Retrieve and parse one feed endpoint.
pub async fn fetch_feed(transport: &dyn Transport, url: &str) -> Result<Vec<RawEntry>, FetchError> {
    let body = transport.get_text(url).await?;
    parse_feed(&body)
}

/// Apply a source's field rules to one raw entry.
pub fn map_entry(def: &SourceDef, endpoint: &FeedEndpoint, raw: RawEntry) -> NewsItem {
    let title = raw.title.unwrap_or_else(|| NO_TITLE.to_string());
    let summary = raw.summary.unwrap_or_else(|| NO_SUMMARY.to_string());
    let (title, summary) = if def.clean_markup {
        (text::clean(&title), text::clean(&summary))
    } else {
        (title.trim().to_string(), summary.trim().to_string())
    };
    let summary = match def.summary_limit {
        Some(limit) => text::truncate(&summary, limit),
        None => summary,
    };

    NewsItem {
        title,
        summary,
        link: raw.link.unwrap_or_default(),
        source: endpoint.name.clone(),
        published: raw.published.unwrap_or_else(|| UNKNOWN_DATE.to_string()),
    }
}

/// Fetches one news slot from all of its endpoints, never failing as a whole.
pub struct SourceFetcher<'a> {
    def: &'a SourceDef,
    transport: &'a dyn Transport,
}

impl<'a> SourceFetcher<'a> {
    pub fn new(def: &'a SourceDef, transport: &'a dyn Transport) -> Self {
        Self { def, transport }
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// Endpoints are read in order; the first occurrence of a link wins (an
    /// empty link included) and the merged list is cut to [`ITEM_CAP`].
    /// Failing endpoints are skipped.
    pub async fn fetch(&self) -> Vec<NewsItem> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut out = Vec::new();
        let mut dedup = 0usize;

        for endpoint in &self.def.endpoints {
            let entries = match fetch_feed(self.transport, &endpoint.url).await {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(
                        target: "ingest",
                        source = %self.def.name,
                        feed = %endpoint.name,
                        url = %endpoint.url,
                        error = %e,
                        "feed unavailable; skipping"
                    );
                    counter!("digest_source_errors_total").increment(1);
                    continue;
                }
            };

            for raw in entries.into_iter().take(OVER_FETCH) {
                let item = map_entry(self.def, endpoint, raw);
                if !seen.insert(item.link.clone()) {
                    dedup += 1;
                    continue;
                }
                out.push(item);
            }
        }

        out.truncate(ITEM_CAP);

        counter!("digest_items_kept_total").increment(out.len() as u64);
        counter!("digest_items_dedup_total").increment(dedup as u64);
        tracing::info!(
            target: "ingest",
            source = %self.def.name,
            kept = out.len(),
            dedup,
            "source fetched"
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> FeedEndpoint {
        FeedEndpoint::new("http://feeds.test/a.xml", "Feed A")
    }

    #[test]
    fn absent_fields_get_documented_defaults() {
        let def = SourceDef::new("S", vec![endpoint()]);
        let item = map_entry(&def, &endpoint(), RawEntry::default());
        assert_eq!(item.title, NO_TITLE);
        assert_eq!(item.summary, NO_SUMMARY);
        assert_eq!(item.link, "");
        assert_eq!(item.published, UNKNOWN_DATE);
        assert_eq!(item.source, "Feed A");
    }

    #[test]
    fn markup_rules_clean_then_truncate() {
        let def = SourceDef::new("S", vec![endpoint()])
            .with_clean_markup(true)
            .with_summary_limit(10);
        let raw = RawEntry {
            title: Some("<b>Stocks</b>&nbsp;up".into()),
            summary: Some("<p>0123456789abcdef</p>".into()),
            link: Some("http://x/1".into()),
            published: Some("Mon, 13 Oct 2025 10:00:00 +0200".into()),
        };
        let item = map_entry(&def, &endpoint(), raw);
        assert_eq!(item.title, "Stocks up");
        assert_eq!(item.summary, "0123456789...");
    }

    #[test]
    fn plain_sources_keep_text_as_is() {
        let def = SourceDef::new("S", vec![endpoint()]);
        let raw = RawEntry {
            title: Some("  A &amp; B ".into()),
            summary: Some("x".repeat(300)),
            ..RawEntry::default()
        };
        let item = map_entry(&def, &endpoint(), raw);
        assert_eq!(item.title, "A &amp; B");
        assert_eq!(item.summary.len(), 300);
    }
}
