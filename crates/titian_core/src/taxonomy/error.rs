//! Taxonomy error taxonomy.
//!
//! Uniqueness violations are recoverable and leave the tree untouched.
//! Precondition violations signal caller bugs (bad index, unknown name or id)
//! and are reported instead of aborting; see
//! [`TaxonomyError::is_precondition_violation`].

use crate::model::category::CategoryId;
use crate::model::field::FieldId;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by taxonomy operations.
pub type TaxonomyResult<T> = Result<T, TaxonomyError>;

/// Errors from taxonomy operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyError {
    /// A sibling of the same kind already uses this name.
    DuplicateName(String),
    /// A field name would clash with a direct subcategory.
    NameCollidesWithSubcategory(String),
    /// A subcategory name would clash with a direct field.
    NameCollidesWithField(String),
    /// Name rejected by the active `NamePolicy`.
    InvalidName(String),
    /// Field is already owned by a category.
    FieldAlreadyAttached {
        field: FieldId,
        owner: CategoryId,
    },
    /// Category already has a parent.
    CategoryAlreadyAttached {
        category: CategoryId,
        parent: CategoryId,
    },
    /// Appending would make a category its own ancestor.
    CycleDetected {
        category: CategoryId,
        parent: CategoryId,
    },
    /// Move index outside `[0, len)`.
    IndexOutOfRange { index: usize, len: usize },
    /// No direct field with this name.
    FieldNotFound(String),
    /// No direct subcategory with this name.
    SubcategoryNotFound(String),
    /// Category id is not registered in this taxonomy.
    CategoryNotFound(CategoryId),
    /// Field id is not registered in this taxonomy.
    UnknownField(FieldId),
    /// A field with this id is already registered.
    FieldIdInUse(FieldId),
}

impl TaxonomyError {
    /// Returns `true` for caller contract violations as opposed to
    /// namespace/ownership rejections.
    pub fn is_precondition_violation(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfRange { .. }
                | Self::FieldNotFound(_)
                | Self::SubcategoryNotFound(_)
                | Self::CategoryNotFound(_)
                | Self::UnknownField(_)
        )
    }

    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateName(_) => "duplicate_name",
            Self::NameCollidesWithSubcategory(_) => "name_collides_with_subcategory",
            Self::NameCollidesWithField(_) => "name_collides_with_field",
            Self::InvalidName(_) => "invalid_name",
            Self::FieldAlreadyAttached { .. } => "field_already_attached",
            Self::CategoryAlreadyAttached { .. } => "category_already_attached",
            Self::CycleDetected { .. } => "cycle_detected",
            Self::IndexOutOfRange { .. } => "index_out_of_range",
            Self::FieldNotFound(_) => "field_not_found",
            Self::SubcategoryNotFound(_) => "subcategory_not_found",
            Self::CategoryNotFound(_) => "category_not_found",
            Self::UnknownField(_) => "unknown_field",
            Self::FieldIdInUse(_) => "field_id_in_use",
        }
    }
}

impl Display for TaxonomyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateName(name) => write!(f, "duplicate name: `{name}`"),
            Self::NameCollidesWithSubcategory(name) => write!(
                f,
                "duplicate name, `{name}` is already the name of a subcategory"
            ),
            Self::NameCollidesWithField(name) => {
                write!(f, "duplicate name, `{name}` is already the name of a field")
            }
            Self::InvalidName(name) => write!(f, "invalid name: `{name}`"),
            Self::FieldAlreadyAttached { field, owner } => {
                write!(f, "field {field} is already attached to category {owner}")
            }
            Self::CategoryAlreadyAttached { category, parent } => write!(
                f,
                "category {category} is already a subcategory of {parent}"
            ),
            Self::CycleDetected { category, parent } => write!(
                f,
                "append would create cycle: category {category} under parent {parent}"
            ),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Self::FieldNotFound(name) => write!(f, "field not found: `{name}`"),
            Self::SubcategoryNotFound(name) => write!(f, "subcategory not found: `{name}`"),
            Self::CategoryNotFound(id) => write!(f, "category not found: {id}"),
            Self::UnknownField(id) => write!(f, "field not found: {id}"),
            Self::FieldIdInUse(id) => write!(f, "field id already registered: {id}"),
        }
    }
}

impl Error for TaxonomyError {}
