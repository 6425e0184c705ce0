//! Mailgun API provider.
//!
//! For reference: [Mailgun API docs](https://documentation.mailgun.com/en/latest/api-sending.html#sending)
//!
//! # Example
//!
//! ```rust,ignore
//! use mailform::providers::MailgunMailer;
//! use mailform::{Configuration, MailBuilder, Mailer};
//!
//! let config = Configuration::new("your-api-key", "mg.yourdomain.com")
//!     .from("noreply@mg.yourdomain.com");
//!
//! let mail = MailBuilder::using(config)
//!     .to("recipient@example.com")?
//!     .subject("Hello")?
//!     .text("World")?
//!     .build();
//!
//! MailgunMailer::new().deliver(&mail).await?;
//! ```
//!
//! Endpoint, domain and API key come from the mail's [`Configuration`].
//! For EU domains, configure `.api_url("https://api.eu.mailgun.net/v3")`.
//!
//! ## Encoding
//!
//! Mail without attachments is posted as `application/x-www-form-urlencoded`;
//! mail with attachments as `multipart/form-data`. Either way each parameter
//! becomes one field, repeated names become repeated fields, in the order
//! they were added.
//!
//! ## Configuration defaults
//!
//! * The configured default sender is sent as `from` when the mail has none.
//! * Each configured default parameter is sent unless the mail already carries
//!   a parameter of that name.

use async_trait::async_trait;
use base64::Engine;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use serde::Deserialize;

use crate::config::Configuration;
use crate::error::MailError;
use crate::form::FormValue;
use crate::mail::Mail;
use crate::mailer::{DeliveryResult, Mailer};

/// Mailgun API mail provider.
#[derive(Debug, Clone, Default)]
pub struct MailgunMailer {
    client: Client,
}

impl MailgunMailer {
    /// Create a new Mailgun mailer.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create with a custom reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn auth_header(config: &Configuration) -> String {
        let credentials = format!("api:{}", config.api_key());
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials.as_bytes());
        format!("Basic {}", encoded)
    }

    fn build_form(mail: &Mail) -> Result<Form, MailError> {
        let mut form = Form::new();

        for (name, value) in mail.params().iter() {
            form = match value {
                FormValue::Text(text) => form.text(name.to_string(), text.clone()),
                FormValue::File(attachment) => {
                    let part = Part::bytes(attachment.data.clone())
                        .file_name(attachment.filename.clone())
                        .mime_str(&attachment.content_type)
                        .map_err(|e| {
                            MailError::AttachmentError(format!("{}: {}", attachment.filename, e))
                        })?;
                    form.part(name.to_string(), part)
                }
            };
        }

        for (name, value) in defaults(mail) {
            form = form.text(name, value);
        }

        Ok(form)
    }
}

/// Fields contributed by the configuration for this mail.
fn defaults(mail: &Mail) -> Vec<(String, String)> {
    let config = mail.configuration();
    let params = mail.params();
    let mut fields = Vec::new();

    if !params.contains("from") {
        if let Some(from) = config.default_from() {
            fields.push(("from".to_string(), from.formatted()));
        }
    }

    for (name, value) in config.default_parameters() {
        if !params.contains(name) {
            fields.push((name.clone(), value.clone()));
        }
    }

    fields
}

/// Text fields of the mail followed by configuration defaults.
fn url_encoded_fields(mail: &Mail) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = mail
        .text_pairs()
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    fields.extend(defaults(mail));
    fields
}

#[async_trait]
impl Mailer for MailgunMailer {
    async fn deliver(&self, mail: &Mail) -> Result<DeliveryResult, MailError> {
        let config = mail.configuration();
        config.validate()?;

        let url = config.messages_url();
        tracing::debug!(
            url = %url,
            params = mail.params().len(),
            multipart = mail.is_multipart(),
            "Posting mail to Mailgun"
        );

        let request = self
            .client
            .post(&url)
            .header("Authorization", Self::auth_header(config))
            .header("User-Agent", format!("mailform/{}", crate::VERSION));

        let request = if mail.is_multipart() {
            request.multipart(Self::build_form(mail)?)
        } else {
            request.form(&url_encoded_fields(mail))
        };

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            let result: MailgunResponse = response.json().await?;
            tracing::debug!(message_id = %result.id, "Mailgun accepted mail");
            Ok(DeliveryResult::with_response(
                result.id,
                serde_json::json!({
                    "provider": "mailgun",
                    "message": result.message,
                }),
            ))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            let error_msg = serde_json::from_str::<MailgunError>(&error_body)
                .map(|e| e.message)
                .unwrap_or(error_body);

            tracing::warn!(status = status.as_u16(), error = %error_msg, "Mailgun rejected mail");
            Err(MailError::provider_with_status(
                "mailgun",
                error_msg,
                status.as_u16(),
            ))
        }
    }

    fn provider_name(&self) -> &'static str {
        "mailgun"
    }
}

// ============================================================================
// Mailgun API Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct MailgunResponse {
    id: String,
    message: String,
}

#[derive(Debug, Deserialize)]
struct MailgunError {
    message: String,
}
