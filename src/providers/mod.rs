//! Mail delivery implementations.
//!
//! Each provider implements the [`Mailer`](crate::Mailer) trait.
//!
//! | Provider | Feature Flag | Description |
//! |----------|-------------|-------------|
//! | [`MailgunMailer`] | `mailgun` | Mailgun HTTP API |
//! | [`LoggerMailer`] | (none) | Logs mail without sending |

#[cfg(feature = "mailgun")]
mod mailgun;
#[cfg(feature = "mailgun")]
pub use mailgun::MailgunMailer;

mod logger;
pub use logger::LoggerMailer;
