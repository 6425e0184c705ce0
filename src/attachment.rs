//! File attachments carried by a multipart mail.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::MailError;

/// Type of attachment disposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttachmentType {
    /// Regular attachment (shown as downloadable file)
    #[default]
    Attachment,
    /// Inline attachment, referenced from HTML as `cid:{filename}`
    Inline,
}

impl AttachmentType {
    /// Form parameter name the delivery service expects for this disposition.
    pub fn param_name(self) -> &'static str {
        match self {
            AttachmentType::Attachment => "attachment",
            AttachmentType::Inline => "inline",
        }
    }
}

/// A named piece of file content plus its metadata.
///
/// The builder treats attachments opaquely; encoding them into a
/// `multipart/form-data` body is left to the mailer.
///
/// ```
/// use mailform::Attachment;
///
/// let report = Attachment::from_bytes("report.pdf", b"%PDF-1.4".to_vec());
/// assert_eq!(report.content_type, "application/pdf");
///
/// let logo = Attachment::from_bytes("logo.png", vec![0x89, 0x50]).inline();
/// assert!(logo.is_inline());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Filename sent with the part
    pub filename: String,
    /// MIME content type (e.g., "application/pdf", "image/png")
    pub content_type: String,
    /// Raw content
    pub data: Vec<u8>,
    /// Whether this is an inline or regular attachment
    pub disposition: AttachmentType,
}

impl Attachment {
    /// Create an attachment from raw bytes.
    ///
    /// Content type is guessed from the filename extension.
    pub fn from_bytes(filename: impl Into<String>, data: Vec<u8>) -> Self {
        let filename = filename.into();
        let content_type = guess_content_type(&filename);

        Self {
            filename,
            content_type,
            data,
            disposition: AttachmentType::Attachment,
        }
    }

    /// Create an attachment from a string, stored as UTF-8 bytes.
    pub fn from_text(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self::from_bytes(filename, text.into().into_bytes())
    }

    /// Create an attachment by reading a file.
    ///
    /// The filename is the last path component; the content type is guessed
    /// from the extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MailError> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("attachment")
            .to_string();

        let data = std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MailError::AttachmentFileNotFound(path.display().to_string())
            } else {
                MailError::AttachmentReadError(format!("{}: {}", path.display(), e))
            }
        })?;

        Ok(Self::from_bytes(filename, data))
    }

    /// Set the content type explicitly.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Mark as inline (for embedding in HTML).
    pub fn inline(mut self) -> Self {
        self.disposition = AttachmentType::Inline;
        self
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_inline(&self) -> bool {
        self.disposition == AttachmentType::Inline
    }
}

fn guess_content_type(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first_or_octet_stream()
        .to_string()
}
