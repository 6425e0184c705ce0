//! Text/HTML body pairs.

use serde::{Deserialize, Serialize};

/// Anything that can render a message body in both plain text and HTML.
///
/// Implement this on your own email views and pass them to
/// [`MailBuilder::content`](crate::MailBuilder::content).
pub trait MailContent {
    /// Plain text representation.
    fn text(&self) -> String;

    /// HTML representation.
    fn html(&self) -> String;
}

impl<T: MailContent + ?Sized> MailContent for &T {
    fn text(&self) -> String {
        (*self).text()
    }

    fn html(&self) -> String {
        (*self).html()
    }
}

/// A ready-made body pair.
///
/// ```
/// use mailform::{Content, MailContent};
///
/// let body = Content::new("Great Scott!", "<p>Great Scott!</p>");
/// assert_eq!(body.text(), "Great Scott!");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub text: String,
    pub html: String,
}

impl Content {
    pub fn new(text: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            html: html.into(),
        }
    }
}

impl MailContent for Content {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn html(&self) -> String {
        self.html.clone()
    }
}
