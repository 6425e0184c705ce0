//! Fluent, mutable builder producing an immutable [`Mail`].

use chrono::{DateTime, TimeZone};
use std::fmt;
use std::sync::Arc;

use crate::address::ToAddress;
use crate::attachment::Attachment;
use crate::config::Configuration;
use crate::content::MailContent;
use crate::error::MailError;
use crate::form::FormParams;
use crate::mail::Mail;
use crate::multipart::MultipartBuilder;

/// Parameters the delivery service expects at most once per message.
///
/// Appending one of these twice is allowed but logged, since which value
/// the service honours is up to the service.
const SINGLE_VALUED: &[&str] = &[
    "from",
    "subject",
    "text",
    "html",
    "h:Reply-To",
    "template",
    "o:deliverytime",
];

/// A mutable builder for a [`Mail`].
///
/// Parts can be added in any order. Every operation appends to an ordered
/// list of form parameters and hands back the same builder, so calls chain
/// with `?`:
///
/// ```
/// use mailform::{Configuration, MailBuilder};
///
/// # fn main() -> Result<(), mailform::MailError> {
/// let config = Configuration::new("key-xyz", "delorean.com");
///
/// let mail = MailBuilder::using(config)
///     .from(("Emmet Brown", "doc@delorean.com"))?
///     .to("marty@hillvalley.com")?
///     .subject("Where we're going")?
///     .text("We don't need roads.")?
///     .build();
///
/// assert_eq!(mail.params().get("from"), Some("Emmet Brown <doc@delorean.com>"));
/// # Ok(())
/// # }
/// ```
///
/// A builder is meant for composing one message. Calling [`build`](Self::build)
/// snapshots the parameters; the builder is not meant to be reused after that.
pub struct MailBuilder {
    configuration: Arc<Configuration>,
    form: FormParams,
}

impl MailBuilder {
    /// Create a builder bound to a configuration.
    ///
    /// Accepts either an owned [`Configuration`] or an `Arc` shared with other
    /// builders.
    pub fn new(configuration: impl Into<Arc<Configuration>>) -> Self {
        Self {
            configuration: configuration.into(),
            form: FormParams::new(),
        }
    }

    /// Same as [`MailBuilder::new`]; reads better at the head of a chain.
    pub fn using(configuration: impl Into<Arc<Configuration>>) -> Self {
        Self::new(configuration)
    }

    /// The configuration this builder was created with.
    pub fn configuration(&self) -> &Arc<Configuration> {
        &self.configuration
    }

    /// Parameters accumulated so far.
    pub fn params(&self) -> &FormParams {
        &self.form
    }

    /// Set the sender.
    ///
    /// `"doc@delorean.com"` is sent as is; `("Emmet Brown", "doc@delorean.com")`
    /// is sent as `Emmet Brown <doc@delorean.com>`.
    pub fn from(&mut self, addr: impl ToAddress) -> Result<&mut Self, MailError> {
        self.param("from", addr.to_address().formatted())
    }

    /// Add a recipient. Repeat to add more.
    pub fn to(&mut self, addr: impl ToAddress) -> Result<&mut Self, MailError> {
        self.param("to", addr.to_address().formatted())
    }

    /// Add a CC recipient. Repeat to add more.
    pub fn cc(&mut self, addr: impl ToAddress) -> Result<&mut Self, MailError> {
        self.param("cc", addr.to_address().formatted())
    }

    /// Add a BCC recipient. Repeat to add more.
    pub fn bcc(&mut self, addr: impl ToAddress) -> Result<&mut Self, MailError> {
        self.param("bcc", addr.to_address().formatted())
    }

    /// Set the `Reply-To` header.
    pub fn reply_to(&mut self, addr: impl ToAddress) -> Result<&mut Self, MailError> {
        self.param("h:Reply-To", addr.to_address().formatted())
    }

    /// Set the subject line. An empty subject is treated as missing.
    pub fn subject(&mut self, subject: impl Into<String>) -> Result<&mut Self, MailError> {
        self.param("subject", subject)
    }

    /// Set the plain text body.
    pub fn text(&mut self, text: impl Into<String>) -> Result<&mut Self, MailError> {
        self.param("text", text)
    }

    /// Set the HTML body.
    pub fn html(&mut self, html: impl Into<String>) -> Result<&mut Self, MailError> {
        self.param("html", html)
    }

    /// Set both bodies from a [`MailContent`], text first then HTML.
    ///
    /// Both representations are required. A text-only content (empty
    /// `html()`) fails with [`MailError::MissingArgument`] and appends
    /// nothing; use [`text`](Self::text) alone for plain mail.
    pub fn content(&mut self, content: &impl MailContent) -> Result<&mut Self, MailError> {
        let text = content.text();
        let html = content.html();
        if text.is_empty() || html.is_empty() {
            return Err(MailError::MissingArgument("value"));
        }
        self.text(text)?.html(html)
    }

    /// Add a custom MIME header, sent as `h:{name}`.
    pub fn header(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&mut Self, MailError> {
        let name = prefixed("h:", name)?;
        self.param(name, value)
    }

    /// Attach a custom variable to the message, sent as `v:{name}`.
    pub fn variable(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&mut Self, MailError> {
        let name = prefixed("v:", name)?;
        self.param(name, value)
    }

    /// Tag the message for analytics. Repeat to add more tags.
    pub fn tag(&mut self, tag: impl Into<String>) -> Result<&mut Self, MailError> {
        self.param("o:tag", tag)
    }

    /// Set a sending option, sent as `o:{name}` (e.g. `tracking`, `testmode`).
    pub fn option(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&mut Self, MailError> {
        let name = prefixed("o:", name)?;
        self.param(name, value)
    }

    /// Schedule delivery, sent as an RFC 2822 date.
    pub fn deliver_at<Tz>(&mut self, time: DateTime<Tz>) -> Result<&mut Self, MailError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.param("o:deliverytime", time.to_rfc2822())
    }

    /// Use a template stored on the delivery service.
    pub fn template(&mut self, name: impl Into<String>) -> Result<&mut Self, MailError> {
        self.param("template", name)
    }

    /// Add an arbitrary parameter.
    ///
    /// Covers anything the named operations don't.
    pub fn parameter(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&mut Self, MailError> {
        self.param(name, value)
    }

    /// Open a scope for adding attachments.
    ///
    /// The scope writes into this builder's parameters; call
    /// [`MultipartBuilder::mail_builder`] to get back here.
    pub fn multipart(&mut self) -> MultipartBuilder<'_> {
        MultipartBuilder::new(self)
    }

    /// Freeze the accumulated parameters into a [`Mail`].
    ///
    /// The mail gets its own copy; later calls on this builder do not
    /// affect it.
    pub fn build(&self) -> Mail {
        tracing::debug!(
            domain = %self.configuration.domain(),
            params = self.form.len(),
            multipart = self.form.has_files(),
            "Built mail"
        );
        Mail::new(Arc::clone(&self.configuration), self.form.clone())
    }

    pub(crate) fn attach(&mut self, attachment: Attachment) -> Result<(), MailError> {
        let name = attachment.disposition.param_name();
        self.form.append_file(name, attachment)
    }

    fn param(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&mut Self, MailError> {
        let name = name.into();
        self.form.append(name.as_str(), value)?;

        if SINGLE_VALUED.contains(&name.as_str()) && self.form.count(&name) > 1 {
            tracing::warn!(
                param = %name,
                count = self.form.count(&name),
                "Single-valued parameter set more than once"
            );
        }

        Ok(self)
    }
}

impl fmt::Debug for MailBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailBuilder")
            .field("domain", &self.configuration.domain())
            .field("form", &self.form)
            .finish()
    }
}

fn prefixed(prefix: &str, name: impl Into<String>) -> Result<String, MailError> {
    let name = name.into();
    if name.trim().is_empty() {
        return Err(MailError::MissingArgument("name"));
    }
    Ok(format!("{}{}", prefix, name))
}
