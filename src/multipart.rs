//! Attachment scope opened from a [`MailBuilder`].

use std::path::Path;

use crate::attachment::Attachment;
use crate::builder::MailBuilder;
use crate::error::MailError;
use crate::mail::Mail;

/// Adds attachments to the builder it was opened from.
///
/// Holds the parent mutably for its whole life and writes straight into the
/// parent's parameters, so attachments interleave with text parameters in
/// call order. Get the parent back with [`mail_builder`](Self::mail_builder).
///
/// ```
/// use mailform::{Attachment, Configuration, MailBuilder};
///
/// # fn main() -> Result<(), mailform::MailError> {
/// let mut builder = MailBuilder::using(Configuration::new("key-xyz", "delorean.com"));
/// builder.to("marty@hillvalley.com")?.subject("Almanac")?;
///
/// builder
///     .multipart()
///     .attachment(Attachment::from_text("almanac.txt", "1950-2000"))?
///     .mail_builder()
///     .text("See attached.")?;
///
/// let mail = builder.build();
/// assert!(mail.is_multipart());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MultipartBuilder<'a> {
    parent: &'a mut MailBuilder,
}

impl<'a> MultipartBuilder<'a> {
    pub(crate) fn new(parent: &'a mut MailBuilder) -> Self {
        Self { parent }
    }

    /// Add an attachment, sent as `attachment` or `inline` depending on its
    /// disposition.
    pub fn attachment(&mut self, attachment: Attachment) -> Result<&mut Self, MailError> {
        self.parent.attach(attachment)?;
        Ok(self)
    }

    /// Add an attachment to be embedded in the HTML body via `cid:{filename}`.
    pub fn inline(&mut self, attachment: Attachment) -> Result<&mut Self, MailError> {
        self.attachment(attachment.inline())
    }

    /// Attach raw bytes under `filename`.
    pub fn attachment_bytes(
        &mut self,
        filename: impl Into<String>,
        data: Vec<u8>,
    ) -> Result<&mut Self, MailError> {
        self.attachment(Attachment::from_bytes(filename, data))
    }

    /// Attach a string as a file named `filename`.
    pub fn attachment_text(
        &mut self,
        filename: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<&mut Self, MailError> {
        self.attachment(Attachment::from_text(filename, text))
    }

    /// Read a file from disk and attach it.
    pub fn attachment_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, MailError> {
        let attachment = Attachment::from_path(path)?;
        self.attachment(attachment)
    }

    /// The builder this scope was opened from, to keep chaining on it.
    pub fn mail_builder(&mut self) -> &mut MailBuilder {
        &mut *self.parent
    }

    /// Shortcut for `mail_builder().build()`.
    pub fn build(&self) -> Mail {
        self.parent.build()
    }
}
