// src/ingest/mod.rs
pub mod feed;
pub mod http;
pub mod source;
pub mod types;

use metrics::{describe_counter, describe_histogram};
use once_cell::sync::OnceCell;

pub use source::SourceFetcher;
pub use types::NewsItem;

/// One-time metrics registration (so series show up once a recorder is installed).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "digest_source_errors_total",
            "Feed endpoints that failed to fetch or parse."
        );
        describe_counter!(
            "digest_items_kept_total",
            "News items kept after dedup and capping."
        );
        describe_counter!(
            "digest_items_dedup_total",
            "News items dropped as duplicate links."
        );
        describe_counter!(
            "digest_price_fallback_total",
            "Instruments that fell through to the placeholder quote."
        );
        describe_counter!(
            "digest_step_panics_total",
            "Aggregation steps that panicked and were replaced by defaults."
        );
        describe_histogram!("digest_run_ms", "Aggregation run time in milliseconds.");
    });
}
