//! Notifier that logs messages instead of sending them.

use async_trait::async_trait;

use common::{AppResult, MailConfig};

use super::{Email, Notifier};

/// Development notifier: every message goes to the `tracing` log.
#[derive(Debug, Clone)]
pub struct LogMailer {
    config: MailConfig,
}

impl LogMailer {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Notifier for LogMailer {
    async fn send(&self, email: Email) -> AppResult<()> {
        let from = email.from.as_deref().unwrap_or(&self.config.from);

        tracing::info!(
            to = %email.to,
            from = %from,
            subject = %email.subject,
            "Processing email"
        );
        tracing::info!(
            "=== EMAIL (not sent) ===\n\
             From: {}\n\
             To: {}\n\
             Subject: {}\n\
             Body:\n{}\n\
             ========================",
            from,
            email.to,
            email.subject,
            email.body
        );

        Ok(())
    }
}
