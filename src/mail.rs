//! The immutable product of a [`MailBuilder`](crate::MailBuilder).

use std::sync::Arc;

use crate::attachment::Attachment;
use crate::config::Configuration;
use crate::form::FormParams;

#[cfg(feature = "mailgun")]
use crate::error::MailError;
#[cfg(feature = "mailgun")]
use crate::mailer::{DeliveryResult, Mailer};
#[cfg(feature = "mailgun")]
use crate::providers::MailgunMailer;

/// Mailer behind [`Mail::send`], shared so its HTTP connection pool is reused.
#[cfg(feature = "mailgun")]
static DEFAULT_MAILER: std::sync::OnceLock<MailgunMailer> = std::sync::OnceLock::new();

#[cfg(feature = "mailgun")]
fn default_mailer() -> &'static MailgunMailer {
    DEFAULT_MAILER.get_or_init(MailgunMailer::new)
}

/// A composed message, ready to hand to a [`Mailer`](crate::Mailer).
///
/// Holds the configuration it was built with and a frozen copy of the form
/// parameters. There is no way to change either.
#[derive(Debug, Clone)]
pub struct Mail {
    configuration: Arc<Configuration>,
    params: FormParams,
}

impl Mail {
    pub(crate) fn new(configuration: Arc<Configuration>, params: FormParams) -> Self {
        Self {
            configuration,
            params,
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// All parameters in the order they were added.
    pub fn params(&self) -> &FormParams {
        &self.params
    }

    /// Text fields, ready for an `application/x-www-form-urlencoded` body.
    pub fn text_pairs(&self) -> Vec<(&str, &str)> {
        self.params.text_pairs()
    }

    pub fn attachments(&self) -> Vec<&Attachment> {
        self.params
            .attachments()
            .into_iter()
            .map(|(_, attachment)| attachment)
            .collect()
    }

    /// Whether the mail carries files and must go out as `multipart/form-data`.
    pub fn is_multipart(&self) -> bool {
        self.params.has_files()
    }

    /// Deliver with a process-wide [`MailgunMailer`](crate::providers::MailgunMailer).
    ///
    /// ```rust,ignore
    /// let result = mail.send().await?;
    /// println!("Queued as {}", result.message_id);
    /// ```
    #[cfg(feature = "mailgun")]
    pub async fn send(&self) -> Result<DeliveryResult, MailError> {
        default_mailer().deliver(self).await
    }
}
