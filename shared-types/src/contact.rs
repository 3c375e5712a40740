use serde::{Deserialize, Serialize};

/// Best-effort name information found next to an email address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameHint {
    pub first: String,
    pub last: String,
}

impl NameHint {
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first.trim().is_empty() && self.last.trim().is_empty()
    }
}

/// Canonical (first name, last name, email) triple.
///
/// The email keeps the casing it was found with; [`ContactRecord::key`] is the
/// lowercase form used for deduplication and ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    #[serde(rename = "First Name")]
    pub first_name: String,
    #[serde(rename = "Last Name")]
    pub last_name: String,
    #[serde(rename = "Email")]
    pub email: String,
}

impl ContactRecord {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Lowercase email, the identity of a record.
    pub fn key(&self) -> String {
        self.email.to_lowercase()
    }

    /// Part of the email before the `@`.
    pub fn local_part(&self) -> &str {
        self.email
            .split_once('@')
            .map(|(local, _)| local)
            .unwrap_or(&self.email)
    }

    /// Part of the email after the `@`, empty when there is none.
    pub fn domain(&self) -> &str {
        self.email
            .split_once('@')
            .map(|(_, domain)| domain)
            .unwrap_or("")
    }
}
