//! Field domain model.
//!
//! # Responsibility
//! - Define the named leaf schema slot owned by one category.
//! - Keep name mutation inside the crate so sibling uniqueness is always
//!   validated by the taxonomy before a rename lands.
//!
//! # Invariants
//! - `id` is stable and never reused for another field.
//! - Identity is `id`, never the name.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one field record.
///
/// Contacts key their per-field values by this id.
pub type FieldId = Uuid;

/// Validation errors for field construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValidationError {
    /// Caller-provided id is the nil UUID.
    NilUuid,
}

impl Display for FieldValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "field id must not be nil"),
        }
    }
}

impl Error for FieldValidationError {}

/// One named schema slot, e.g. "Phone Number".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    id: FieldId,
    name: String,
    description: String,
}

impl Field {
    /// Creates a field with a generated stable ID.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
        }
    }

    /// Creates a field with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(
        id: FieldId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, FieldValidationError> {
        if id.is_nil() {
            return Err(FieldValidationError::NilUuid);
        }
        Ok(Self {
            id,
            name: name.into(),
            description: description.into(),
        })
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replaces the description unconditionally. Never fails.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Only the owning taxonomy may rename, after checking siblings.
    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }
}
