//! Category domain model.
//!
//! # Responsibility
//! - Define the named tree node holding ordered field and subcategory ids.
//!
//! # Invariants
//! - Child lists hold ids only; records live in the owning `Taxonomy`.
//! - Child order is insertion order unless explicitly moved.
//! - Field names and subcategory names share one namespace per category;
//!   the taxonomy enforces this before any list mutation.

use crate::model::field::FieldId;
use serde::Serialize;
use uuid::Uuid;

/// Stable identifier for one category record.
pub type CategoryId = Uuid;

/// Named tree node in the field taxonomy.
///
/// Serialized as an outbound view only; child ids are meaningful solely
/// inside the `Taxonomy` that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    id: CategoryId,
    name: String,
    description: String,
    fields: Vec<FieldId>,
    subcategories: Vec<CategoryId>,
}

impl Category {
    pub(crate) fn new(name: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            fields: Vec::new(),
            subcategories: Vec::new(),
        }
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Direct field ids in display order.
    pub fn fields(&self) -> &[FieldId] {
        &self.fields
    }

    /// Direct subcategory ids in display order.
    pub fn subcategories(&self) -> &[CategoryId] {
        &self.subcategories
    }

    /// Replaces the description. Never fails.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn fields_mut(&mut self) -> &mut Vec<FieldId> {
        &mut self.fields
    }

    pub(crate) fn subcategories_mut(&mut self) -> &mut Vec<CategoryId> {
        &mut self.subcategories
    }
}
