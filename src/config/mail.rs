// src/config/mail.rs
use anyhow::{bail, Context, Result};
use std::fmt;

const DEFAULT_SMTP_SERVER: &str = "poczta.o2.pl";
const DEFAULT_SMTP_PORT: u16 = 465;

/// SMTP settings read from the environment (`.env` is loaded by `main`).
#[derive(Clone, PartialEq, Eq)]
pub struct MailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub sender: String,
    pub password: String,
    pub recipient: String,
}

impl MailConfig {
    pub fn from_env() -> Result<Self> {
        let smtp_server = non_empty_var("SMTP_SERVER")
            .unwrap_or_else(|| DEFAULT_SMTP_SERVER.to_string());
        let smtp_port = match non_empty_var("SMTP_PORT") {
            Some(p) => p
                .trim()
                .parse()
                .with_context(|| format!("SMTP_PORT is not a port number: {p}"))?,
            None => DEFAULT_SMTP_PORT,
        };
        Ok(Self {
            smtp_server,
            smtp_port,
            sender: non_empty_var("EMAIL_SENDER").unwrap_or_default(),
            password: non_empty_var("EMAIL_PASSWORD").unwrap_or_default(),
            recipient: non_empty_var("EMAIL_RECIPIENT").unwrap_or_default(),
        })
    }

    /// Names of required settings that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("EMAIL_SENDER", &self.sender),
            ("EMAIL_PASSWORD", &self.password),
            ("EMAIL_RECIPIENT", &self.recipient),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
        .collect()
    }

    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            bail!("missing mail configuration: {}", missing.join(", "));
        }
        Ok(())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

// Password is never printed.
impl fmt::Display for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() {
            "NOT SET".to_string()
        } else {
            "*".repeat(self.password.chars().count())
        };
        write!(
            f,
            "smtp={}:{} sender={} recipient={} password={}",
            self.smtp_server, self.smtp_port, self.sender, self.recipient, password
        )
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
