//! Contact use-case service.
//!
//! # Responsibility
//! - Manage contact creation, e-mail verification and primary promotion.
//! - Attach typed field values keyed by taxonomy field ids.
//! - Merge duplicate contacts.
//!
//! # Invariants
//! - An e-mail address belongs to at most one contact.
//! - The primary address can be replaced but never removed.
//! - Log events carry ids only, never addresses.

use crate::model::category::CategoryId;
use crate::model::contact::{Contact, ContactId, EmailAddress, FieldValue};
use crate::model::field::{Field, FieldId};
use crate::repo::contact_repo::{ContactRepoError, ContactRepository};
use crate::taxonomy::error::TaxonomyError;
use crate::taxonomy::tree::Taxonomy;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by contact service operations.
pub type ContactResult<T> = Result<T, ContactServiceError>;

/// Errors from contact service operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactServiceError {
    /// Target contact does not exist.
    ContactNotFound(ContactId),
    /// Another contact (or this one) already owns the address.
    EmailInUse(EmailAddress),
    /// Primary address removal was requested.
    CannotRemovePrimary,
    /// A contact cannot be merged into itself.
    SelfMerge(ContactId),
    /// Field id is not registered in the taxonomy.
    UnknownField(FieldId),
    /// Taxonomy lookup failure.
    Taxonomy(TaxonomyError),
    /// Repository-level failure.
    Repo(ContactRepoError),
}

impl Display for ContactServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContactNotFound(id) => write!(f, "contact not found: {id}"),
            Self::EmailInUse(email) => write!(f, "e-mail address `{email}` is already in use"),
            Self::CannotRemovePrimary => write!(f, "cannot remove the primary e-mail address"),
            Self::SelfMerge(id) => write!(f, "cannot merge contact {id} into itself"),
            Self::UnknownField(id) => write!(f, "field not found: {id}"),
            Self::Taxonomy(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ContactServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Taxonomy(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContactRepoError> for ContactServiceError {
    fn from(value: ContactRepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<TaxonomyError> for ContactServiceError {
    fn from(value: TaxonomyError) -> Self {
        match value {
            TaxonomyError::UnknownField(id) => Self::UnknownField(id),
            other => Self::Taxonomy(other),
        }
    }
}

/// One schema slot paired with a contact's value for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry<'a> {
    pub field: &'a Field,
    pub value: Option<&'a FieldValue>,
}

/// Contact service facade.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates service from repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Creates a contact whose primary address is `email`.
    pub fn create_contact(&mut self, email: EmailAddress) -> ContactResult<ContactId> {
        self.ensure_email_unused(&email)?;
        let id = self.repo.insert(Contact::new(email))?;
        info!("event=contact_create module=contact status=ok contact_id={id}");
        Ok(id)
    }

    pub fn get_contact(&self, id: ContactId) -> ContactResult<&Contact> {
        self.repo.get(id).ok_or(ContactServiceError::ContactNotFound(id))
    }

    /// Returns the contact owning `email`, if any.
    pub fn find_by_email(&self, email: &EmailAddress) -> Option<&Contact> {
        self.repo
            .find_by_email(email)
            .and_then(|id| self.repo.get(id))
    }

    pub fn delete_contact(&mut self, id: ContactId) -> ContactResult<Contact> {
        let contact = self
            .repo
            .remove(id)
            .ok_or(ContactServiceError::ContactNotFound(id))?;
        info!("event=contact_delete module=contact status=ok contact_id={id}");
        Ok(contact)
    }

    /// Adds `email` as a secondary verified address.
    ///
    /// Fails with `EmailInUse` when any contact already owns it.
    pub fn verify_email(&mut self, id: ContactId, email: EmailAddress) -> ContactResult<()> {
        self.get_contact(id)?;
        self.ensure_email_unused(&email)?;
        self.contact_mut(id)?.push_secondary(email);
        debug!("event=email_verify module=contact status=ok contact_id={id}");
        Ok(())
    }

    /// Makes `email` the primary address, bumping the old primary to the
    /// front of the secondary list.
    ///
    /// An address not yet owned by the contact is verified first.
    pub fn set_primary_email(&mut self, id: ContactId, email: EmailAddress) -> ContactResult<()> {
        if !self.get_contact(id)?.owns_email(&email) {
            self.ensure_email_unused(&email)?;
            self.contact_mut(id)?.push_secondary(email.clone());
        }
        self.contact_mut(id)?.promote(&email);
        debug!("event=email_promote module=contact status=ok contact_id={id}");
        Ok(())
    }

    /// Removes a secondary address. No-op when the contact does not own it.
    pub fn remove_email(&mut self, id: ContactId, email: &EmailAddress) -> ContactResult<()> {
        if self.get_contact(id)?.email_address() == email {
            return Err(ContactServiceError::CannotRemovePrimary);
        }
        self.contact_mut(id)?.remove_secondary(email);
        Ok(())
    }

    /// Folds `from` into `into` and deletes `from`.
    ///
    /// `into` keeps its primary address and existing field values; every
    /// address of `from` becomes a secondary of `into`, and values for fields
    /// `into` lacks are copied over.
    pub fn merge(&mut self, into: ContactId, from: ContactId) -> ContactResult<()> {
        if into == from {
            return Err(ContactServiceError::SelfMerge(into));
        }
        self.get_contact(into)?;
        let associated = self
            .repo
            .remove(from)
            .ok_or(ContactServiceError::ContactNotFound(from))?;
        self.contact_mut(into)?.absorb(associated);
        info!("event=contact_merge module=contact status=ok contact_id={into} merged_id={from}");
        Ok(())
    }

    /// Stores a value for a field registered in `taxonomy`.
    pub fn set_field_value(
        &mut self,
        taxonomy: &Taxonomy,
        id: ContactId,
        field: FieldId,
        value: FieldValue,
    ) -> ContactResult<()> {
        if taxonomy.field(field).is_none() {
            return Err(ContactServiceError::UnknownField(field));
        }
        self.contact_mut(id)?.set_field_value(field, value);
        Ok(())
    }

    pub fn field_value(&self, id: ContactId, field: FieldId) -> ContactResult<Option<&FieldValue>> {
        Ok(self.get_contact(id)?.field_value(field))
    }

    pub fn clear_field_value(
        &mut self,
        id: ContactId,
        field: FieldId,
    ) -> ContactResult<Option<FieldValue>> {
        Ok(self.contact_mut(id)?.clear_field_value(field))
    }

    /// Lists every field under `root` in walk order with the contact's value.
    pub fn schema_values<'a>(
        &'a self,
        taxonomy: &'a Taxonomy,
        root: CategoryId,
        id: ContactId,
    ) -> ContactResult<Vec<SchemaEntry<'a>>> {
        let contact = self.get_contact(id)?;
        let mut entries = Vec::new();
        taxonomy.walk_fields(root, |field| {
            entries.push(SchemaEntry {
                field,
                value: contact.field_value(field.id()),
            });
        })?;
        Ok(entries)
    }

    /// Drops values for purged fields from every contact.
    ///
    /// Returns the number of values removed.
    pub fn forget_fields(&mut self, fields: &[FieldId]) -> usize {
        let mut removed = 0;
        for id in self.repo.ids() {
            let Some(contact) = self.repo.get_mut(id) else {
                continue;
            };
            for field in fields {
                if contact.clear_field_value(*field).is_some() {
                    removed += 1;
                }
            }
        }
        debug!("event=field_values_forget module=contact status=ok removed={removed}");
        removed
    }

    fn contact_mut(&mut self, id: ContactId) -> ContactResult<&mut Contact> {
        self.repo
            .get_mut(id)
            .ok_or(ContactServiceError::ContactNotFound(id))
    }

    fn ensure_email_unused(&self, email: &EmailAddress) -> ContactResult<()> {
        if self.repo.find_by_email(email).is_some() {
            return Err(ContactServiceError::EmailInUse(email.clone()));
        }
        Ok(())
    }
}
