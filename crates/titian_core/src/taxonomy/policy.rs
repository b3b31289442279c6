//! Name assignment policy for categories and fields.

use crate::taxonomy::error::{TaxonomyError, TaxonomyResult};

/// Controls which names the taxonomy accepts on create and rename.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NamePolicy {
    /// Every name is accepted unchanged.
    #[default]
    Permissive,
    /// Names are trimmed; blank names are rejected.
    RejectBlank,
}

impl NamePolicy {
    pub(crate) fn apply(self, name: String) -> TaxonomyResult<String> {
        match self {
            Self::Permissive => Ok(name),
            Self::RejectBlank => {
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Err(TaxonomyError::InvalidName(name));
                }
                Ok(trimmed.to_string())
            }
        }
    }
}
