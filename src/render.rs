// src/render.rs
//! HTML email document for one `AggregateResult`.

use chrono::NaiveDate;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write;

use crate::digest::AggregateResult;
use crate::ingest::NewsItem;
use crate::prices::{InstrumentId, PriceQuote, QuoteStatus};

const CSS: &str = "\
body{font-family:'Segoe UI',Tahoma,Verdana,sans-serif;background:#f5f5f5;padding:20px;line-height:1.6}\
.container{max-width:800px;margin:0 auto;background:#fff;border-radius:10px;overflow:hidden}\
.header{background:linear-gradient(135deg,#667eea 0%,#764ba2 100%);color:#fff;padding:30px;text-align:center}\
.section{padding:25px 30px;border-bottom:1px solid #eee}\
.news-item{margin-bottom:18px}\
.news-meta{font-size:12px;color:#7f8c8d}\
.financial-grid{display:flex;gap:16px}\
.metal-card{flex:1;background:#f5f7fa;padding:20px;border-radius:10px;text-align:center}\
.positive{color:#27ae60}.negative{color:#e74c3c}\
.footer{background:#34495e;color:#fff;padding:20px;text-align:center;font-size:12px}";

pub fn subject(date: NaiveDate) -> String {
    format!("[NEWS] Daily Digest - {}", date.format("%d.%m.%Y"))
}

pub fn render_html(result: &AggregateResult) -> String {
    let date = result.generated_at.format("%d.%m.%Y");
    let mut html = String::with_capacity(16 * 1024);
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <title>Daily Digest - {date}</title>\n<style>{CSS}</style>\n</head>\n<body>\n\
         <div class=\"container\">\n<div class=\"header\"><h1>Daily Digest</h1><p>{date}</p></div>\n"
    );

    news_section(&mut html, "World", "world", &result.world_news);
    news_section(&mut html, "Poland", "regional", &result.regional_news);
    news_section(&mut html, "Finance - Bankier.pl", "finance", &result.finance_news);

    html.push_str("<div class=\"section markets\"><h2>Markets</h2><div class=\"financial-grid\">\n");
    for (id, label) in [(InstrumentId::Gold, "GOLD"), (InstrumentId::Silver, "SILVER")] {
        match result.instrument(id) {
            Some(q) => metal_card(&mut html, label, q),
            None => metal_card(&mut html, label, &PriceQuote::fallback(label)),
        }
    }
    html.push_str("</div></div>\n");

    let _ = write!(
        html,
        "<div class=\"footer\"><p>Generated automatically</p><p>Data fetched: {}</p></div>\n\
         </div>\n</body>\n</html>\n",
        result.generated_at.format("%d.%m.%Y %H:%M")
    );
    html
}

fn news_section(html: &mut String, title: &str, class: &str, items: &[NewsItem]) {
    let _ = write!(html, "<div class=\"section {class}\"><h2>{}</h2>\n", text(title));
    if items.is_empty() {
        html.push_str("<p>No news available.</p>\n");
    }
    for item in items {
        let href = if item.link.is_empty() { "#" } else { item.link.as_str() };
        let _ = write!(
            html,
            "<div class=\"news-item\"><h3><a href=\"{href}\" target=\"_blank\">{title}</a></h3>\
             <div class=\"news-meta\">{source} &bull; {published}</div>\
             <div class=\"news-summary\">{summary}</div></div>\n",
            href = attr(href),
            title = text(&item.title),
            source = text(&item.source),
            published = text(&item.published),
            summary = text(&item.summary),
        );
    }
    html.push_str("</div>\n");
}

fn metal_card(html: &mut String, label: &str, q: &PriceQuote) {
    if let QuoteStatus::Unavailable(reason) = &q.status {
        let _ = write!(
            html,
            "<div class=\"metal-card unavailable\"><div class=\"metal-name\">[{label}] {name}</div>\
             <div class=\"news-summary\">{reason}</div></div>\n",
            name = text(&q.display_name),
            reason = text(reason),
        );
        return;
    }
    // Colour and arrow treat a flat day as non-negative.
    let (class, arrow) = if q.daily_change >= 0.0 {
        ("positive", "&uarr;")
    } else {
        ("negative", "&darr;")
    };
    let _ = write!(
        html,
        "<div class=\"metal-card\"><div class=\"metal-name\">[{label}] {name}</div>\
         <div class=\"metal-price\">{price:.2} {currency} / {unit}</div>\
         <div class=\"metal-change {class}\">{arrow} Today: {dc:+.2} ({dcp:+.2}%)</div>\
         <div class=\"metal-change {class}\">Month: {pc:+.2} ({pcp:+.2}%)</div></div>\n",
        name = text(&q.display_name),
        price = q.price,
        currency = text(&q.currency),
        unit = text(&q.unit),
        dc = q.daily_change,
        dcp = q.daily_change_percent,
        pc = q.period_change,
        pcp = q.period_change_percent,
    );
}
