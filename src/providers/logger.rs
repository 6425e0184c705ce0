//! Logger mailer that only logs mail.
//!
//! Useful for staging environments or when you want to see what would be sent
//! without talking to the delivery service.

use async_trait::async_trait;

use crate::error::MailError;
use crate::mail::Mail;
use crate::mailer::{DeliveryResult, Mailer};

/// Logger mailer that emits tracing events for mail.
pub struct LoggerMailer {
    /// If true, log every parameter. If false, just log a recipient summary.
    log_full: bool,
}

impl LoggerMailer {
    /// Create a logger mailer with brief output (just recipients).
    pub fn new() -> Self {
        Self { log_full: false }
    }

    /// Create a logger mailer that logs every parameter.
    pub fn full() -> Self {
        Self { log_full: true }
    }

    /// Set whether to log every parameter.
    pub fn log_full(mut self, full: bool) -> Self {
        self.log_full = full;
        self
    }
}

impl Default for LoggerMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for LoggerMailer {
    async fn deliver(&self, mail: &Mail) -> Result<DeliveryResult, MailError> {
        let message_id = uuid::Uuid::new_v4().to_string();
        let params = mail.params();

        if self.log_full {
            tracing::info!(
                message_id = %message_id,
                domain = %mail.configuration().domain(),
                from = ?params.get("from"),
                to = ?params.get_all("to"),
                cc = ?params.get_all("cc"),
                bcc = ?params.get_all("bcc"),
                subject = ?params.get("subject"),
                has_html = params.contains("html"),
                has_text = params.contains("text"),
                attachments = mail.attachments().len(),
                "Mail logged (full)"
            );

            for (name, value) in mail.text_pairs() {
                tracing::debug!(param = %name, value = %value, "Mail parameter");
            }
        } else {
            tracing::info!(
                message_id = %message_id,
                to = ?params.get_all("to"),
                subject = ?params.get("subject"),
                "Mail logged"
            );
        }

        Ok(DeliveryResult::new(message_id))
    }

    fn provider_name(&self) -> &'static str {
        "logger"
    }
}
