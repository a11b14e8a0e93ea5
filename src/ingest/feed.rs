// src/ingest/feed.rs
//! RSS 2.0 / Atom decoding into typed `RawEntry` values.

use quick_xml::de::from_str;
use serde::Deserialize;

use crate::error::FetchError;
use crate::ingest::types::RawEntry;

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    summary: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entry: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<String>,
    #[serde(default)]
    link: Vec<AtomLink>,
    summary: Option<String>,
    content: Option<String>,
    published: Option<String>,
    updated: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: Option<String>,
    #[serde(rename = "@rel")]
    rel: Option<String>,
}

impl From<Item> for RawEntry {
    fn from(it: Item) -> Self {
        RawEntry {
            title: it.title,
            summary: it.description.or(it.summary),
            link: it.link.map(|l| l.trim().to_string()),
            published: it.pub_date,
        }
    }
}

impl From<AtomEntry> for RawEntry {
    fn from(e: AtomEntry) -> Self {
        // rel="alternate" is the article itself; a bare link means the same.
        let link = e
            .link
            .iter()
            .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
            .or(e.link.first())
            .and_then(|l| l.href.clone());
        RawEntry {
            title: e.title,
            summary: e.summary.or(e.content),
            link,
            published: e.published.or(e.updated),
        }
    }
}

/// Parse a syndication document, RSS first and Atom second.
pub fn parse_feed(body: &str) -> Result<Vec<RawEntry>, FetchError> {
    let xml = scrub_html_entities_for_xml(body);
    match from_str::<Rss>(&xml) {
        Ok(rss) => Ok(rss.channel.item.into_iter().map(RawEntry::from).collect()),
        Err(_) if xml.contains("<feed") => from_str::<AtomFeed>(&xml)
            .map(|feed| feed.entry.into_iter().map(RawEntry::from).collect())
            .map_err(FetchError::from),
        Err(rss_err) => Err(rss_err.into()),
    }
}

const HTML_ENTITIES: [(&str, &str); 8] = [
    ("&nbsp;", "&#160;"),
    ("&ndash;", "&#8211;"),
    ("&mdash;", "&#8212;"),
    ("&ldquo;", "&#8220;"),
    ("&rdquo;", "&#8221;"),
    ("&lsquo;", "&#8216;"),
    ("&rsquo;", "&#8217;"),
    ("&hellip;", "&#8230;"),
];

// HTML-only entities are not defined in XML and would abort parsing.
// CDATA sections are copied through untouched.
fn scrub_html_entities_for_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("<![CDATA[") {
        out.push_str(&scrub_segment(&rest[..start]));
        let cdata = &rest[start..];
        match cdata.find("]]>") {
            Some(end) => {
                out.push_str(&cdata[..end + 3]);
                rest = &cdata[end + 3..];
            }
            None => {
                out.push_str(cdata);
                rest = "";
            }
        }
    }
    out.push_str(&scrub_segment(rest));
    out
}

fn scrub_segment(s: &str) -> String {
    HTML_ENTITIES
        .iter()
        .fold(s.to_string(), |acc, (from, to)| acc.replace(from, to))
}
