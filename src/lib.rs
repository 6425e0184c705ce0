//! # Mailform
//!
//! Compose transactional email as an ordered list of form parameters and
//! deliver it to a Mailgun-style HTTP API.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mailform::{Configuration, MailBuilder};
//!
//! let config = Configuration::new("key-3ax6xnjp29jd6fds4gc373sgvjxteol0", "delorean.com")
//!     .from(("Emmet Brown", "doc@delorean.com"));
//!
//! let mail = MailBuilder::using(config)
//!     .to("marty@hillvalley.com")?
//!     .cc(("Jennifer Parker", "jennifer@hillvalley.com"))?
//!     .subject("Great Scott!")?
//!     .text("Meet me at the clock tower.")?
//!     .build();
//!
//! mail.send().await?;
//! ```
//!
//! Parameters go out in the order they were added. Recipients repeat:
//! calling [`MailBuilder::to`] twice yields two `to` fields.
//!
//! ## Attachments
//!
//! ```rust,ignore
//! let mut builder = MailBuilder::using(config);
//! builder.to("marty@hillvalley.com")?.subject("Almanac")?;
//! builder
//!     .multipart()
//!     .attachment_file("almanac.pdf")?
//!     .inline(Attachment::from_path("logo.png")?)?
//!     .mail_builder()
//!     .html("<img src=\"cid:logo.png\">")?;
//! let mail = builder.build();
//! ```
//!
//! ## Environment Variables
//!
//! Read by [`Configuration::from_env`]:
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `MAILGUN_API_KEY` | API key |
//! | `MAILGUN_DOMAIN` | Sending domain |
//! | `MAILGUN_API_URL` | API endpoint (default `https://api.mailgun.net/v3`) |
//! | `EMAIL_FROM` | Default sender email |
//! | `EMAIL_FROM_NAME` | Default sender name |
//!
//! ## Feature Flags
//!
//! - `mailgun` (default) - HTTP delivery via reqwest

/// The version of the mailform crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod address;
mod attachment;
mod builder;
mod config;
mod content;
mod error;
mod form;
mod mail;
mod mailer;
mod multipart;

pub mod providers;

// Re-exports
pub use address::{Address, ToAddress};
pub use attachment::{Attachment, AttachmentType};
pub use builder::MailBuilder;
pub use config::{Configuration, DEFAULT_API_URL};
pub use content::{Content, MailContent};
pub use error::MailError;
pub use form::{FormParams, FormValue};
pub use mail::Mail;
pub use mailer::{DeliveryResult, Mailer};
pub use multipart::MultipartBuilder;
