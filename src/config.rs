//! Shared, read-only delivery settings.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

use crate::address::Address;
use crate::error::MailError;

/// Default Mailgun API endpoint (US region).
pub const DEFAULT_API_URL: &str = "https://api.mailgun.net/v3";

/// Settings shared by every builder that composes mail for one account.
///
/// Wrap it in an `Arc` and hand clones to as many builders as you need;
/// nothing in this crate mutates it after construction.
///
/// ```
/// use mailform::Configuration;
///
/// let config = Configuration::new("key-3ax6xnjp29jd6fds4gc373sgvjxteol0", "samples.mailgun.org")
///     .from(("Excited User", "me@samples.mailgun.org"))
///     .default_parameter("o:tracking", "yes");
///
/// assert_eq!(config.messages_url(), "https://api.mailgun.net/v3/samples.mailgun.org/messages");
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct Configuration {
    api_key: String,
    domain: String,
    #[serde(default = "default_api_url")]
    api_url: String,
    #[serde(default)]
    from: Option<Address>,
    #[serde(default)]
    default_parameters: Vec<(String, String)>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Configuration {
    /// Create a configuration for the given API key and sending domain.
    pub fn new(api_key: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            domain: domain.into(),
            api_url: default_api_url(),
            from: None,
            default_parameters: Vec::new(),
        }
    }

    /// Build a configuration from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `MAILGUN_API_KEY` | API key (required) |
    /// | `MAILGUN_DOMAIN` | Sending domain (required) |
    /// | `MAILGUN_API_URL` | Endpoint, e.g. `https://api.eu.mailgun.net/v3` |
    /// | `EMAIL_FROM` | Default sender email |
    /// | `EMAIL_FROM_NAME` | Default sender name |
    pub fn from_env() -> Result<Self, MailError> {
        let api_key = env::var("MAILGUN_API_KEY")
            .map_err(|_| MailError::Configuration("MAILGUN_API_KEY not set".into()))?;
        let domain = env::var("MAILGUN_DOMAIN")
            .map_err(|_| MailError::Configuration("MAILGUN_DOMAIN not set".into()))?;

        let mut config = Self::new(api_key, domain);

        if let Ok(url) = env::var("MAILGUN_API_URL") {
            config = config.api_url(url);
        }

        if let Some(email) = env::var("EMAIL_FROM").ok().filter(|e| !e.trim().is_empty()) {
            config.from = Some(match env::var("EMAIL_FROM_NAME") {
                Ok(name) => Address::with_name(name, email),
                Err(_) => Address::new(email),
            });
        }

        tracing::debug!(domain = %config.domain, api_url = %config.api_url, "Loaded configuration from environment");
        Ok(config)
    }

    /// Set the API endpoint (e.g., for EU: `https://api.eu.mailgun.net/v3`).
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the default sender, used at delivery when a mail has no `from`.
    pub fn from(mut self, addr: impl Into<Address>) -> Self {
        self.from = Some(addr.into());
        self
    }

    /// Add a parameter sent with every mail that does not set it itself.
    pub fn default_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_parameters.push((name.into(), value.into()));
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// API endpoint without a trailing slash, however it was configured.
    pub fn endpoint(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    pub fn default_from(&self) -> Option<&Address> {
        self.from.as_ref()
    }

    pub fn default_parameters(&self) -> &[(String, String)] {
        &self.default_parameters
    }

    /// Full URL of the message submission resource.
    pub fn messages_url(&self) -> String {
        format!("{}/{}/messages", self.endpoint(), self.domain)
    }

    /// Check that the credentials are present and the default sender, if
    /// any, has an address.
    pub fn validate(&self) -> Result<(), MailError> {
        if self.api_key.trim().is_empty() {
            return Err(MailError::Configuration("api key is empty".into()));
        }
        if self.domain.trim().is_empty() {
            return Err(MailError::Configuration("domain is empty".into()));
        }
        if let Some(from) = &self.from {
            if from.email.trim().is_empty() {
                return Err(MailError::Configuration("default sender is empty".into()));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("api_key", &"<redacted>")
            .field("domain", &self.domain)
            .field("api_url", &self.api_url)
            .field("from", &self.from)
            .field("default_parameters", &self.default_parameters)
            .finish()
    }
}
