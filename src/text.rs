// src/text.rs
//! Plain-text cleanup for feed titles and summaries.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Summary cap applied by news sources that embed markup.
pub const SUMMARY_LIMIT: usize = 200;

static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("static regex"));
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));
static RE_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(nbsp|amp|lt|gt|quot|#39);").expect("static regex"));

/// Strip markup and decode the six basic entities.
///
/// Order matters: CDATA markers go first so `<![CDATA[..]]>` is not eaten
/// whole by the tag pattern, and entities are decoded in a single pass
/// (`&amp;lt;` becomes `&lt;`, never `<`). Whitespace is collapsed after
/// decoding so `&nbsp;` next to a space folds into one.
pub fn clean(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let out = raw.replace("<![CDATA[", "").replace("]]>", "");
    let out = RE_TAGS.replace_all(&out, "");
    let out = RE_ENTITY.replace_all(&out, |caps: &Captures| {
        match &caps[1] {
            "nbsp" => " ",
            "amp" => "&",
            "lt" => "<",
            "gt" => ">",
            "quot" => "\"",
            _ => "'",
        }
        .to_string()
    });
    let out = RE_WS.replace_all(&out, " ");
    out.trim().to_string()
}

/// Cap `s` at `limit` characters, appending `...` when anything was cut.
pub fn truncate(s: &str, limit: usize) -> String {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
