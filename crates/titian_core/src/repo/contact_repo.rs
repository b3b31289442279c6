//! Contact repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Store contacts by stable id and answer e-mail ownership lookups.
//!
//! # Invariants
//! - Contact ids are unique within one repository.
//! - An e-mail address belongs to at most one stored contact.
//! - Listing is deterministic: ascending contact id.

use crate::model::contact::{Contact, ContactId, EmailAddress};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by contact repository operations.
pub type ContactRepoResult<T> = Result<T, ContactRepoError>;

/// Errors from contact repository operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactRepoError {
    /// A contact with this id is already stored.
    DuplicateContactId(ContactId),
    /// Another stored contact already owns the address.
    EmailInUse {
        email: EmailAddress,
        owner: ContactId,
    },
}

impl Display for ContactRepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateContactId(id) => write!(f, "contact id already stored: {id}"),
            Self::EmailInUse { email, owner } => {
                write!(f, "e-mail address `{email}` already belongs to contact {owner}")
            }
        }
    }
}

impl Error for ContactRepoError {}

/// Repository interface for contact storage.
pub trait ContactRepository {
    /// Stores one new contact.
    ///
    /// Fails when the id is taken or another contact owns one of its
    /// addresses.
    fn insert(&mut self, contact: Contact) -> ContactRepoResult<ContactId>;
    /// Loads one contact by id.
    fn get(&self, id: ContactId) -> Option<&Contact>;
    /// Loads one contact by id for mutation.
    fn get_mut(&mut self, id: ContactId) -> Option<&mut Contact>;
    /// Removes one contact, returning it when present.
    fn remove(&mut self, id: ContactId) -> Option<Contact>;
    /// Finds the contact owning `email` as primary or secondary address.
    fn find_by_email(&self, email: &EmailAddress) -> Option<ContactId>;
    /// Lists stored contact ids in ascending order.
    fn ids(&self) -> Vec<ContactId>;
}

/// Map-backed contact repository.
#[derive(Debug, Default)]
pub struct InMemoryContactRepository {
    contacts: BTreeMap<ContactId, Contact>,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

impl ContactRepository for InMemoryContactRepository {
    fn insert(&mut self, contact: Contact) -> ContactRepoResult<ContactId> {
        let id = contact.id();
        if self.contacts.contains_key(&id) {
            return Err(ContactRepoError::DuplicateContactId(id));
        }
        for email in contact.email_addresses() {
            if let Some(owner) = self.find_by_email(&email) {
                return Err(ContactRepoError::EmailInUse { email, owner });
            }
        }
        self.contacts.insert(id, contact);
        Ok(id)
    }

    fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.get(&id)
    }

    fn get_mut(&mut self, id: ContactId) -> Option<&mut Contact> {
        self.contacts.get_mut(&id)
    }

    fn remove(&mut self, id: ContactId) -> Option<Contact> {
        self.contacts.remove(&id)
    }

    fn find_by_email(&self, email: &EmailAddress) -> Option<ContactId> {
        self.contacts
            .values()
            .find(|contact| contact.owns_email(email))
            .map(Contact::id)
    }

    fn ids(&self) -> Vec<ContactId> {
        self.contacts.keys().copied().collect()
    }
}
