// src/run_log.rs
use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

pub const ENV_LOG_PATH: &str = "DIGEST_LOG_PATH";
pub const DEFAULT_LOG_PATH: &str = "newsletter.log";

/// Outcome of one digest run, handed to the log at the very end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl RunOutcome {
    pub fn success() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }

    pub fn line(&self, at: DateTime<Local>) -> String {
        let status = if self.success { "SUCCESS" } else { "FAILURE" };
        let mut line = format!("[{}] Digest run: {status}", at.format("%Y-%m-%d %H:%M:%S"));
        if let Some(e) = &self.error {
            line.push_str(" - Error: ");
            line.push_str(e);
        }
        line
    }

    /// Log the outcome and append it to `path`. An unwritable file only warns.
    pub fn record(&self, path: &Path) {
        let line = self.line(Local::now());
        if self.success {
            tracing::info!(target: "digest", "{line}");
        } else {
            tracing::error!(target: "digest", "{line}");
        }

        let appended = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut f| writeln!(f, "{line}"));
        if let Err(e) = appended {
            tracing::warn!(target: "digest", path = %path.display(), error = %e, "cannot append run log");
        }
    }
}
