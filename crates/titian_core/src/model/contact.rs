//! Contact domain model.
//!
//! # Responsibility
//! - Define contact identity, validated e-mail addresses and typed field
//!   values keyed by `FieldId`.
//!
//! # Invariants
//! - A contact always has a primary e-mail address.
//! - `EmailAddress` is never empty; it is validated at construction.
//! - Secondary addresses never repeat the primary address or each other.

use crate::model::field::FieldId;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("valid email regex")
});

/// Stable contact identifier.
pub type ContactId = Uuid;

/// Validation errors for contact-level values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    /// Input is not a syntactically valid e-mail address.
    InvalidEmailAddress(String),
    /// Contact id must not be nil.
    NilContactId,
    /// The same address appears twice on one contact.
    DuplicateEmailAddress(EmailAddress),
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmailAddress(value) => write!(f, "invalid e-mail address: `{value}`"),
            Self::NilContactId => write!(f, "contact id must not be nil"),
            Self::DuplicateEmailAddress(email) => {
                write!(f, "e-mail address `{email}` is listed more than once")
            }
        }
    }
}

impl Error for ContactValidationError {}

/// Validated e-mail address.
///
/// Comparison is exact after trimming; the domain part is lowercased.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ContactValidationError> {
        let trimmed = value.as_ref().trim();
        if !EMAIL_RE.is_match(trimmed) {
            return Err(ContactValidationError::InvalidEmailAddress(
                trimmed.to_string(),
            ));
        }
        // The regex guarantees exactly one `@`.
        let (local, domain) = trimmed.split_once('@').unwrap_or((trimmed, ""));
        Ok(Self(format!("{local}@{}", domain.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EmailAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = ContactValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Typed payload stored for one field on one contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
    Email(EmailAddress),
}

/// An individual or organization reachable by e-mail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ContactRecord")]
pub struct Contact {
    id: ContactId,
    email: EmailAddress,
    verified_emails: Vec<EmailAddress>,
    fields: BTreeMap<FieldId, FieldValue>,
}

/// Unchecked wire shape of [`Contact`].
#[derive(Deserialize)]
struct ContactRecord {
    id: ContactId,
    email: EmailAddress,
    #[serde(default)]
    verified_emails: Vec<EmailAddress>,
    #[serde(default)]
    fields: BTreeMap<FieldId, FieldValue>,
}

impl TryFrom<ContactRecord> for Contact {
    type Error = ContactValidationError;

    fn try_from(record: ContactRecord) -> Result<Self, Self::Error> {
        if record.id.is_nil() {
            return Err(ContactValidationError::NilContactId);
        }
        let mut seen = BTreeSet::new();
        for email in std::iter::once(&record.email).chain(&record.verified_emails) {
            if !seen.insert(email) {
                return Err(ContactValidationError::DuplicateEmailAddress(email.clone()));
            }
        }
        Ok(Self {
            id: record.id,
            email: record.email,
            verified_emails: record.verified_emails,
            fields: record.fields,
        })
    }
}

impl Contact {
    pub(crate) fn new(email: EmailAddress) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            verified_emails: Vec::new(),
            fields: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> ContactId {
        self.id
    }

    /// Primary e-mail address.
    pub fn email_address(&self) -> &EmailAddress {
        &self.email
    }

    /// Secondary verified addresses, oldest promotion first.
    pub fn secondary_email_addresses(&self) -> &[EmailAddress] {
        &self.verified_emails
    }

    /// All verified addresses, primary first.
    pub fn email_addresses(&self) -> Vec<EmailAddress> {
        std::iter::once(self.email.clone())
            .chain(self.verified_emails.iter().cloned())
            .collect()
    }

    pub fn owns_email(&self, email: &EmailAddress) -> bool {
        self.email == *email || self.verified_emails.contains(email)
    }

    pub fn field_value(&self, field: FieldId) -> Option<&FieldValue> {
        self.fields.get(&field)
    }

    pub fn field_values(&self) -> &BTreeMap<FieldId, FieldValue> {
        &self.fields
    }

    pub(crate) fn push_secondary(&mut self, email: EmailAddress) {
        self.verified_emails.push(email);
    }

    /// Promotes an owned address; the old primary becomes the first secondary.
    pub(crate) fn promote(&mut self, email: &EmailAddress) -> bool {
        if self.email == *email {
            return true;
        }
        let Some(index) = self.verified_emails.iter().position(|e| e == email) else {
            return false;
        };
        let promoted = self.verified_emails.remove(index);
        let demoted = std::mem::replace(&mut self.email, promoted);
        self.verified_emails.insert(0, demoted);
        true
    }

    pub(crate) fn remove_secondary(&mut self, email: &EmailAddress) {
        self.verified_emails.retain(|e| e != email);
    }

    pub(crate) fn set_field_value(&mut self, field: FieldId, value: FieldValue) {
        self.fields.insert(field, value);
    }

    pub(crate) fn clear_field_value(&mut self, field: FieldId) -> Option<FieldValue> {
        self.fields.remove(&field)
    }

    /// Absorbs another contact's addresses and any field values missing here.
    pub(crate) fn absorb(&mut self, other: Contact) {
        for email in other.email_addresses() {
            if !self.owns_email(&email) {
                self.verified_emails.push(email);
            }
        }
        for (field, value) in other.fields {
            self.fields.entry(field).or_insert(value);
        }
    }
}
