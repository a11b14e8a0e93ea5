// tests/digest_e2e.rs
use daily_digest::prices::QuoteStatus;
use daily_digest::{Aggregator, DigestConfig, InstrumentId, StubReply, StubTransport};
use std::collections::HashSet;

fn rss(prefix: &str, links: &[String]) -> String {
    let items: String = links
        .iter()
        .enumerate()
        .map(|(i, l)| {
            format!(
                "<item><title>{prefix} {i}</title><link>{l}</link>\
                 <description><![CDATA[<p>{prefix} summary {i}</p>]]></description></item>"
            )
        })
        .collect();
    format!(r#"<rss version="2.0"><channel><title>{prefix}</title>{items}</channel></rss>"#)
}

fn links(base: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{base}/{i}")).collect()
}

fn stooq_csv(closes: &[f64]) -> String {
    let mut s = String::from("Date,Open,High,Low,Close,Volume\n");
    for (i, c) in closes.iter().enumerate() {
        s.push_str(&format!("2025-09-{:02},1,1,1,{c},0\n", i + 1));
    }
    s
}

#[tokio::test]
async fn world_news_is_capped_and_unique_across_feeds() {
    let cfg = DigestConfig::default();
    let mut top = links("https://bbc.test/top", 5);
    let mut world = links("https://bbc.test/world", 5);
    // One story appears in both feeds.
    top[1] = "https://bbc.test/shared".into();
    world[0] = "https://bbc.test/shared".into();
    top.truncate(2);

    let t = StubTransport::new()
        .with_body(cfg.world.endpoints[0].url.clone(), rss("top", &top))
        .with_body(cfg.world.endpoints[1].url.clone(), rss("world", &world));

    let result = Aggregator::new(&cfg, &t).run().await;
    assert!(result.world_news.len() <= 3);
    assert_eq!(result.world_news.len(), 3);
    let unique: HashSet<&str> = result.world_news.iter().map(|n| n.link.as_str()).collect();
    assert_eq!(unique.len(), result.world_news.len());
    assert_eq!(result.world_news[1].link, "https://bbc.test/shared");
    assert_eq!(result.world_news[1].source, "BBC News");
    assert_eq!(result.world_news[2].link, "https://bbc.test/world/1");

    // Nothing else answered: the other slots degrade, the run still completes.
    assert!(result.regional_news.is_empty());
    assert!(result.finance_news.is_empty());
    assert_eq!(result.instruments.len(), 2);
}

#[tokio::test]
async fn two_full_world_feeds_with_one_shared_link() {
    let cfg = DigestConfig::default();
    let mut top = links("https://bbc.test/top", 5);
    let mut world = links("https://bbc.test/world", 5);
    top[3] = "https://bbc.test/shared".into();
    world[0] = "https://bbc.test/shared".into();

    let t = StubTransport::new()
        .with_body(cfg.world.endpoints[0].url.clone(), rss("top", &top))
        .with_body(cfg.world.endpoints[1].url.clone(), rss("world", &world));

    let result = Aggregator::new(&cfg, &t).run().await;
    let got: Vec<&str> = result.world_news.iter().map(|n| n.link.as_str()).collect();
    assert_eq!(
        got,
        vec!["https://bbc.test/top/0", "https://bbc.test/top/1", "https://bbc.test/top/2"]
    );
    assert!(result.world_news.iter().all(|n| n.source == "BBC News"));
}

#[tokio::test]
async fn file_config_cannot_raise_the_item_cap() {
    let cfg = DigestConfig::from_toml_str(
        r#"
[world]
name = "World"
cap = 10
over_fetch = 10
endpoints = [{ url = "http://bbc.test/rss.xml", name = "BBC News" }]
"#,
    )
    .unwrap();
    let t = StubTransport::new()
        .with_body("http://bbc.test/rss.xml", rss("top", &links("https://bbc.test/top", 5)));

    let result = Aggregator::new(&cfg, &t).run().await;
    assert_eq!(result.world_news.len(), 3);
}

#[tokio::test]
async fn malformed_gold_payload_does_not_touch_silver() {
    let cfg = DigestConfig::default();
    let p = &cfg.prices;
    let t = StubTransport::new()
        .with_body(p.stooq_history_url(&p.gold_symbol), "<html>rate limited</html>")
        .with_body(
            p.nbp_gold_url.clone(),
            r#"[{"data":"2025-10-10","cena":400.0},{"data":"2025-10-13","cena":402.0}]"#,
        )
        .with_body(p.stooq_history_url(&p.silver_symbol), stooq_csv(&[40.0, 41.0, 42.0]));

    let result = Aggregator::new(&cfg, &t).run().await;

    let gold = result.instrument(InstrumentId::Gold).unwrap();
    assert_eq!(gold.status, QuoteStatus::Ok);
    assert_eq!(gold.display_name, "Gold (NBP)");
    assert_eq!(gold.period_change, 0.0);

    let silver = result.instrument(InstrumentId::Silver).unwrap();
    assert_eq!(silver.display_name, "Silver");
    assert_eq!(silver.price, 42.0);
    assert_eq!(silver.daily_change, 1.0);
    assert_eq!(silver.period_change, 2.0);
    assert_eq!(silver.period_change_percent, 5.0);
}

#[tokio::test]
async fn all_sources_down_yields_complete_degraded_result() {
    let cfg = DigestConfig::default();
    let t = StubTransport::new().with_reply(cfg.finance.endpoints[0].url.clone(), StubReply::Timeout);

    let result = Aggregator::new(&cfg, &t).run().await;
    assert!(result.is_fully_degraded());
    for id in [InstrumentId::Gold, InstrumentId::Silver] {
        let q = result.instrument(id).unwrap();
        assert!(matches!(q.status, QuoteStatus::Unavailable(_)));
        assert_eq!(q.price, 0.0);
    }
}

#[tokio::test]
async fn steps_run_in_fixed_order() {
    let cfg = DigestConfig::default();
    let t = StubTransport::new();
    Aggregator::new(&cfg, &t).run().await;

    let calls = t.calls();
    let pos = |url: &str| calls.iter().position(|c| c == url).unwrap();
    let p = &cfg.prices;
    let order = [
        pos(cfg.world.endpoints[0].url.as_str()),
        pos(cfg.world.endpoints[1].url.as_str()),
        pos(cfg.regional.endpoints[0].url.as_str()),
        pos(cfg.finance.endpoints[0].url.as_str()),
        pos(p.stooq_history_url(&p.gold_symbol).as_str()),
        pos(p.nbp_gold_url.as_str()),
        pos(p.stooq_history_url(&p.silver_symbol).as_str()),
        pos(p.silver_usd_url.as_str()),
    ];
    assert!(order.windows(2).all(|w| w[0] < w[1]), "calls: {calls:?}");
}

#[tokio::test]
async fn regional_and_finance_summaries_are_plain_text() {
    let cfg = DigestConfig::default();
    let t = StubTransport::new()
        .with_body(
            cfg.regional.endpoints[0].url.clone(),
            rss("kraj", &links("https://wyborcza.test/k", 4)),
        )
        .with_body(
            cfg.finance.endpoints[0].url.clone(),
            rss("bankier", &links("https://bankier.test/b", 2)),
        );

    let result = Aggregator::new(&cfg, &t).run().await;
    assert_eq!(result.regional_news.len(), 3);
    assert_eq!(result.finance_news.len(), 2);
    assert_eq!(result.regional_news[0].summary, "kraj summary 0");
    assert!(result
        .finance_news
        .iter()
        .all(|n| !n.summary.contains('<') && n.source == "Bankier.pl"));
}
