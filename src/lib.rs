// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod config;
pub mod digest;
pub mod error;
pub mod ingest;
pub mod notify;
pub mod prices;
pub mod render;
pub mod run_log;
pub mod series;
pub mod text;

// ---- Re-exports for stable public API ----
pub use crate::config::{DigestConfig, MailConfig};
pub use crate::digest::{AggregateResult, Aggregator};
pub use crate::error::FetchError;
pub use crate::ingest::http::{HttpTransport, StubReply, StubTransport, Transport};
pub use crate::ingest::NewsItem;
pub use crate::prices::{InstrumentId, PriceQuote, QuoteStatus};
