//! Mailer trait and delivery result types.
//!
//! `#[async_trait]` is used instead of native async traits so that mailers
//! stay object safe and can be stored as `Arc<dyn Mailer>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::MailError;
use crate::mail::Mail;

/// Result of a successful delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryResult {
    /// Message ID assigned by the provider
    pub message_id: String,
    /// Optional provider-specific response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_response: Option<serde_json::Value>,
}

impl DeliveryResult {
    /// Create a new delivery result with just a message ID.
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            provider_response: None,
        }
    }

    /// Create a delivery result with provider response.
    pub fn with_response(message_id: impl Into<String>, response: serde_json::Value) -> Self {
        Self {
            message_id: message_id.into(),
            provider_response: Some(response),
        }
    }
}

/// Something that can deliver a built [`Mail`].
///
/// Endpoint and credentials travel with the mail's
/// [`Configuration`](crate::Configuration), so one mailer can deliver mail
/// composed for different accounts.
///
/// ```ignore
/// use mailform::{Configuration, MailBuilder, Mailer};
/// use mailform::providers::MailgunMailer;
///
/// let mail = MailBuilder::using(Configuration::from_env()?)
///     .to("marty@hillvalley.com")?
///     .subject("Hello")?
///     .text("World")?
///     .build();
///
/// let result = MailgunMailer::new().deliver(&mail).await?;
/// println!("Sent with ID: {}", result.message_id);
/// ```
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a single mail.
    async fn deliver(&self, mail: &Mail) -> Result<DeliveryResult, MailError>;

    /// Deliver several mails, stopping at the first failure.
    async fn deliver_many(&self, mails: &[Mail]) -> Result<Vec<DeliveryResult>, MailError> {
        let mut results = Vec::with_capacity(mails.len());
        for mail in mails {
            results.push(self.deliver(mail).await?);
        }
        Ok(results)
    }

    /// Get the provider name (for logging/debugging).
    fn provider_name(&self) -> &'static str {
        "unknown"
    }
}
