//! Daily digest — binary entrypoint.
//! Validates configuration, aggregates all sources, renders and mails the digest.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use daily_digest::notify::EmailSender;
use daily_digest::run_log::{RunOutcome, DEFAULT_LOG_PATH, ENV_LOG_PATH};
use daily_digest::{render, Aggregator, DigestConfig, HttpTransport, MailConfig};

/// JSON output when DIGEST_LOG_JSON=1, compact text otherwise.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("daily_digest=info,warn"));
    let json = std::env::var("DIGEST_LOG_JSON")
        .ok()
        .is_some_and(|v| v == "1");

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().compact()).init();
    }
}

fn dry_run_requested() -> bool {
    std::env::args().any(|a| a == "--dry-run")
        || std::env::var("DIGEST_DRY_RUN")
            .ok()
            .is_some_and(|v| v == "1")
}

async fn run(dry_run: bool) -> Result<()> {
    let mail = if dry_run {
        None
    } else {
        let mail = MailConfig::from_env()?;
        mail.validate()?;
        tracing::info!(config = %mail, "mail configuration ok");
        Some(mail)
    };

    let cfg = DigestConfig::load_default()?;
    let transport = HttpTransport::new(&cfg.http)?;

    tracing::info!("collecting sources");
    let result = Aggregator::new(&cfg, &transport).run().await;
    if result.is_fully_degraded() {
        tracing::warn!("every source failed; sending a degraded digest");
    }

    let html = render::render_html(&result);
    let subject = render::subject(result.generated_at.date_naive());

    match mail {
        None => {
            println!("{html}");
            Ok(())
        }
        Some(mail) => {
            let sender = EmailSender::new(&mail)?;
            sender
                .send_html(&subject, html)
                .await
                .context("sending digest email")
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let log_path = std::env::var(ENV_LOG_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_PATH));

    match run(dry_run_requested()).await {
        Ok(()) => {
            RunOutcome::success().record(&log_path);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = ?e, "digest run failed");
            RunOutcome::failure(format!("{e:#}")).record(&log_path);
            ExitCode::FAILURE
        }
    }
}
