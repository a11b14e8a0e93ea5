// src/notify/email.rs
use anyhow::{Context, Result};
use lettre::message::{header, Mailbox, Message};
use lettre::transport::smtp::{authentication::Credentials, AsyncSmtpTransport};
use lettre::{AsyncTransport, Tokio1Executor};

use crate::config::MailConfig;

pub struct EmailSender {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl EmailSender {
    /// Implicit-TLS SMTP session with login credentials.
    pub fn new(cfg: &MailConfig) -> Result<Self> {
        let creds = Credentials::new(cfg.sender.clone(), cfg.password.clone());
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&cfg.smtp_server)
            .with_context(|| format!("invalid SMTP_SERVER {}", cfg.smtp_server))?
            .port(cfg.smtp_port)
            .credentials(creds)
            .build();

        let from = cfg
            .sender
            .parse()
            .with_context(|| format!("invalid EMAIL_SENDER {}", cfg.sender))?;
        let to = cfg
            .recipient
            .parse()
            .with_context(|| format!("invalid EMAIL_RECIPIENT {}", cfg.recipient))?;

        Ok(Self { mailer, from, to })
    }

    pub fn build_message(&self, subject: &str, html: String) -> Result<Message> {
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(header::ContentType::TEXT_HTML)
            .body(html)
            .context("build email")
    }

    pub async fn send_html(&self, subject: &str, html: String) -> Result<()> {
        let msg = self.build_message(subject, html)?;
        tracing::info!(target: "notify", to = %self.to, "sending digest");
        self.mailer.send(msg).await.context("send email")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> MailConfig {
        MailConfig {
            smtp_server: "smtp.example.test".into(),
            smtp_port: 465,
            sender: "digest@example.test".into(),
            password: "secret".into(),
            recipient: "reader@example.test".into(),
        }
    }

    #[tokio::test]
    async fn builds_html_message() {
        let sender = EmailSender::new(&cfg()).unwrap();
        let msg = sender
            .build_message("[NEWS] Daily Digest - 14.10.2026", "<p>hi</p>".into())
            .unwrap();
        let raw = String::from_utf8(msg.formatted()).unwrap();
        assert!(raw.contains("Content-Type: text/html; charset=utf-8"));
        assert!(raw.contains("To: reader@example.test"));
    }

    #[test]
    fn rejects_bad_recipient() {
        let mut c = cfg();
        c.recipient = "not an address".into();
        assert!(EmailSender::new(&c).is_err());
    }
}
