//! Group domain model.
//!
//! # Invariants
//! - Membership is a set: adding twice keeps one entry.
//! - Members are contact ids only; groups never own contacts.

use crate::model::contact::ContactId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Stable group identifier.
pub type GroupId = Uuid;

/// Arbitrary named grouping of contacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    id: GroupId,
    name: String,
    description: String,
    members: BTreeSet<ContactId>,
}

impl Group {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            members: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Optional free-form description; empty when unset.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Member ids in ascending id order.
    pub fn members(&self) -> Vec<ContactId> {
        self.members.iter().copied().collect()
    }

    /// Returns `true` when the contact was not already a member.
    pub fn add_contact(&mut self, contact: ContactId) -> bool {
        self.members.insert(contact)
    }

    /// Returns `true` when the contact was a member.
    pub fn remove_contact(&mut self, contact: ContactId) -> bool {
        self.members.remove(&contact)
    }

    pub fn contains(&self, contact: ContactId) -> bool {
        self.members.contains(&contact)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Re-points membership after `from` was merged into `to`.
    pub fn replace_member(&mut self, from: ContactId, to: ContactId) {
        if self.members.remove(&from) {
            self.members.insert(to);
        }
    }
}
