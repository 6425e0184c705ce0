//! Ordered, multi-valued form parameters.

use serde::{Deserialize, Serialize};

use crate::attachment::Attachment;
use crate::error::MailError;

/// Value of one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormValue {
    /// Plain text field
    Text(String),
    /// File part (only encodable as `multipart/form-data`)
    File(Attachment),
}

impl FormValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormValue::Text(text) => Some(text),
            FormValue::File(_) => None,
        }
    }

    pub fn as_attachment(&self) -> Option<&Attachment> {
        match self {
            FormValue::Text(_) => None,
            FormValue::File(attachment) => Some(attachment),
        }
    }
}

/// Append-only list of `(name, value)` pairs.
///
/// Names may repeat; every pair is kept in the order it was appended, which
/// is the order the fields go out on the wire.
///
/// ```
/// use mailform::FormParams;
///
/// let mut form = FormParams::new();
/// form.append("to", "marty@hillvalley.com").unwrap();
/// form.append("to", "doc@delorean.com").unwrap();
///
/// assert_eq!(form.get_all("to"), vec!["marty@hillvalley.com", "doc@delorean.com"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(String, FormValue)>", into = "Vec<(String, FormValue)>")]
pub struct FormParams {
    pairs: Vec<(String, FormValue)>,
}

impl FormParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field.
    ///
    /// Fails with [`MailError::MissingArgument`] on a blank name or an empty
    /// value, leaving the list untouched.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<(), MailError> {
        let name = name.into();
        let value = value.into();
        check_name(&name)?;
        if value.is_empty() {
            return Err(MailError::MissingArgument("value"));
        }
        self.pairs.push((name, FormValue::Text(value)));
        Ok(())
    }

    /// Append a file part.
    pub fn append_file(&mut self, name: impl Into<String>, attachment: Attachment) -> Result<(), MailError> {
        let name = name.into();
        check_name(&name)?;
        self.pairs.push((name, FormValue::File(attachment)));
        Ok(())
    }

    /// All pairs, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.pairs.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// First text value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter()
            .filter(|(n, _)| *n == name)
            .find_map(|(_, value)| value.as_text())
    }

    /// Every text value stored under `name`, in insertion order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.iter()
            .filter(|(n, _)| *n == name)
            .filter_map(|(_, value)| value.as_text())
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pairs.iter().any(|(n, _)| n == name)
    }

    /// Number of values stored under `name`.
    pub fn count(&self, name: &str) -> usize {
        self.pairs.iter().filter(|(n, _)| n == name).count()
    }

    /// Text fields only, in insertion order.
    pub fn text_pairs(&self) -> Vec<(&str, &str)> {
        self.iter()
            .filter_map(|(name, value)| value.as_text().map(|text| (name, text)))
            .collect()
    }

    /// File parts only, with their field names.
    pub fn attachments(&self) -> Vec<(&str, &Attachment)> {
        self.iter()
            .filter_map(|(name, value)| value.as_attachment().map(|a| (name, a)))
            .collect()
    }

    pub fn has_files(&self) -> bool {
        self.pairs
            .iter()
            .any(|(_, value)| matches!(value, FormValue::File(_)))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl TryFrom<Vec<(String, FormValue)>> for FormParams {
    type Error = MailError;

    /// Rebuild from raw pairs, applying the same checks as [`FormParams::append`].
    fn try_from(pairs: Vec<(String, FormValue)>) -> Result<Self, Self::Error> {
        let mut form = FormParams::new();
        for (name, value) in pairs {
            match value {
                FormValue::Text(text) => form.append(name, text)?,
                FormValue::File(attachment) => form.append_file(name, attachment)?,
            }
        }
        Ok(form)
    }
}

impl From<FormParams> for Vec<(String, FormValue)> {
    fn from(form: FormParams) -> Self {
        form.pairs
    }
}

fn check_name(name: &str) -> Result<(), MailError> {
    if name.trim().is_empty() {
        return Err(MailError::MissingArgument("name"));
    }
    Ok(())
}
