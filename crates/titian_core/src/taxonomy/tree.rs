//! Arena-backed category/field taxonomy.
//!
//! # Responsibility
//! - Own every category and field record, keyed by stable id.
//! - Enforce the shared field/subcategory namespace of each category.
//! - Provide append, move, rename, remove and purge operations.
//!
//! # Invariants
//! - Within one category, field names and subcategory names are distinct.
//! - A field has at most one owning category; a category at most one parent.
//! - No category is its own ancestor.
//! - A failed operation leaves the taxonomy unchanged.

use crate::model::category::{Category, CategoryId};
use crate::model::field::{Field, FieldId};
use crate::taxonomy::error::{TaxonomyError, TaxonomyResult};
use crate::taxonomy::policy::NamePolicy;
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};

/// In-process owner of a forest of categories and their fields.
///
/// Detached categories (no parent) are roots. Callers sharing one taxonomy
/// across threads must wrap the whole value in their own lock.
#[derive(Debug, Default)]
pub struct Taxonomy {
    policy: NamePolicy,
    categories: BTreeMap<CategoryId, Category>,
    fields: BTreeMap<FieldId, Field>,
    field_owners: HashMap<FieldId, CategoryId>,
    parents: HashMap<CategoryId, CategoryId>,
}

impl Taxonomy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name_policy(policy: NamePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn name_policy(&self) -> NamePolicy {
        self.policy
    }

    /// Creates a detached category with empty child lists.
    ///
    /// Sibling conflicts are checked later, by `append_subcategory`.
    pub fn create_category(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> TaxonomyResult<CategoryId> {
        let name = self.policy.apply(name.into())?;
        let category = Category::new(name, description.into());
        let id = category.id();
        self.categories.insert(id, category);
        debug!("event=category_create module=taxonomy status=ok category_id={id}");
        Ok(id)
    }

    /// Creates and registers a detached field.
    pub fn create_field(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> TaxonomyResult<FieldId> {
        self.insert_field(Field::new(name, description))
    }

    /// Registers a caller-built field as detached.
    pub fn insert_field(&mut self, mut field: Field) -> TaxonomyResult<FieldId> {
        let id = field.id();
        if self.fields.contains_key(&id) {
            return Err(TaxonomyError::FieldIdInUse(id));
        }
        let name = self.policy.apply(field.name().to_string())?;
        field.set_name(name);
        self.fields.insert(id, field);
        debug!("event=field_create module=taxonomy status=ok field_id={id}");
        Ok(id)
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(&id)
    }

    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.get(&id)
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Direct fields of `category`, in list order.
    pub fn fields(&self, category: CategoryId) -> TaxonomyResult<Vec<&Field>> {
        let node = self.require_category(category)?;
        Ok(node
            .fields()
            .iter()
            .filter_map(|id| self.fields.get(id))
            .collect())
    }

    /// Direct subcategories of `category`, in list order.
    pub fn subcategories(&self, category: CategoryId) -> TaxonomyResult<Vec<&Category>> {
        let node = self.require_category(category)?;
        Ok(node
            .subcategories()
            .iter()
            .filter_map(|id| self.categories.get(id))
            .collect())
    }

    /// Looks up a direct field by name. Not recursive.
    pub fn get_field(&self, category: CategoryId, name: &str) -> TaxonomyResult<Option<&Field>> {
        let node = self.require_category(category)?;
        Ok(self.find_field(node, name))
    }

    /// Looks up a direct subcategory by name. Not recursive.
    pub fn get_subcategory(
        &self,
        category: CategoryId,
        name: &str,
    ) -> TaxonomyResult<Option<&Category>> {
        let node = self.require_category(category)?;
        Ok(self.find_subcategory(node, name))
    }

    pub fn parent_of(&self, category: CategoryId) -> Option<CategoryId> {
        self.parents.get(&category).copied()
    }

    pub fn owner_of(&self, field: FieldId) -> Option<CategoryId> {
        self.field_owners.get(&field).copied()
    }

    /// Categories without a parent, ordered by id.
    pub fn roots(&self) -> Vec<CategoryId> {
        self.categories
            .keys()
            .filter(|id| !self.parents.contains_key(id))
            .copied()
            .collect()
    }

    pub fn set_category_description(
        &mut self,
        category: CategoryId,
        description: impl Into<String>,
    ) -> TaxonomyResult<()> {
        self.require_category_mut(category)?
            .set_description(description);
        Ok(())
    }

    pub fn set_field_description(
        &mut self,
        field: FieldId,
        description: impl Into<String>,
    ) -> TaxonomyResult<()> {
        self.fields
            .get_mut(&field)
            .ok_or(TaxonomyError::UnknownField(field))?
            .set_description(description);
        Ok(())
    }

    /// Appends a detached field to the end of `category`'s field list.
    ///
    /// # Errors
    /// - `DuplicateName` when a direct field already has the name.
    /// - `NameCollidesWithSubcategory` when a direct subcategory has it.
    /// - `FieldAlreadyAttached` when another category owns the field.
    pub fn append_field(&mut self, category: CategoryId, field: FieldId) -> TaxonomyResult<()> {
        let result = self.try_append_field(category, field);
        log_outcome("field_append", category, &result);
        result
    }

    fn try_append_field(&mut self, category: CategoryId, field: FieldId) -> TaxonomyResult<()> {
        let node = self.require_category(category)?;
        let record = self
            .fields
            .get(&field)
            .ok_or(TaxonomyError::UnknownField(field))?;
        if let Some(owner) = self.owner_of(field) {
            return Err(TaxonomyError::FieldAlreadyAttached { field, owner });
        }
        self.check_field_name(node, record.name())?;

        self.require_category_mut(category)?.fields_mut().push(field);
        self.field_owners.insert(field, category);
        Ok(())
    }

    /// Appends a detached category to the end of `parent`'s subcategory list.
    ///
    /// # Errors
    /// - `DuplicateName` when a direct subcategory already has the name.
    /// - `NameCollidesWithField` when a direct field has it.
    /// - `CategoryAlreadyAttached` when `child` already has a parent.
    /// - `CycleDetected` when `child` is `parent` or one of its ancestors.
    pub fn append_subcategory(
        &mut self,
        parent: CategoryId,
        child: CategoryId,
    ) -> TaxonomyResult<()> {
        let result = self.try_append_subcategory(parent, child);
        log_outcome("subcategory_append", parent, &result);
        result
    }

    fn try_append_subcategory(
        &mut self,
        parent: CategoryId,
        child: CategoryId,
    ) -> TaxonomyResult<()> {
        let node = self.require_category(parent)?;
        let record = self.require_category(child)?;
        if let Some(existing) = self.parent_of(child) {
            return Err(TaxonomyError::CategoryAlreadyAttached {
                category: child,
                parent: existing,
            });
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(TaxonomyError::CycleDetected {
                category: child,
                parent,
            });
        }
        self.check_subcategory_name(node, record.name())?;

        self.require_category_mut(parent)?
            .subcategories_mut()
            .push(child);
        self.parents.insert(child, parent);
        Ok(())
    }

    /// Removes the field at `from` and reinserts it at `to` of the
    /// post-removal list.
    ///
    /// Both indices must lie in `[0, len)` of the list at call time.
    pub fn move_field(
        &mut self,
        category: CategoryId,
        from: usize,
        to: usize,
    ) -> TaxonomyResult<()> {
        let result = self
            .require_category_mut(category)
            .and_then(|node| move_within(node.fields_mut(), from, to));
        log_outcome("field_move", category, &result);
        result
    }

    /// Subcategory counterpart of [`Taxonomy::move_field`].
    pub fn move_subcategory(
        &mut self,
        category: CategoryId,
        from: usize,
        to: usize,
    ) -> TaxonomyResult<()> {
        let result = self
            .require_category_mut(category)
            .and_then(|node| move_within(node.subcategories_mut(), from, to));
        log_outcome("subcategory_move", category, &result);
        result
    }

    /// Renames a direct field in place; its list position is kept.
    ///
    /// # Errors
    /// - `DuplicateName` / `NameCollidesWithSubcategory` when `to` is taken.
    /// - `FieldNotFound` when no direct field is named `from`.
    pub fn rename_field(
        &mut self,
        category: CategoryId,
        from: &str,
        to: impl Into<String>,
    ) -> TaxonomyResult<()> {
        let result = self.try_rename_field(category, from, to.into());
        log_outcome("field_rename", category, &result);
        result
    }

    fn try_rename_field(
        &mut self,
        category: CategoryId,
        from: &str,
        to: String,
    ) -> TaxonomyResult<()> {
        let to = self.policy.apply(to)?;
        let node = self.require_category(category)?;
        self.check_field_name(node, &to)?;
        let id = self
            .find_field(node, from)
            .map(Field::id)
            .ok_or_else(|| TaxonomyError::FieldNotFound(from.to_string()))?;

        if let Some(field) = self.fields.get_mut(&id) {
            field.set_name(to);
        }
        Ok(())
    }

    /// Renames a direct subcategory in place; its list position is kept.
    ///
    /// # Errors
    /// - `DuplicateName` / `NameCollidesWithField` when `to` is taken.
    /// - `SubcategoryNotFound` when no direct subcategory is named `from`.
    pub fn rename_subcategory(
        &mut self,
        category: CategoryId,
        from: &str,
        to: impl Into<String>,
    ) -> TaxonomyResult<()> {
        let result = self.try_rename_subcategory(category, from, to.into());
        log_outcome("subcategory_rename", category, &result);
        result
    }

    fn try_rename_subcategory(
        &mut self,
        category: CategoryId,
        from: &str,
        to: String,
    ) -> TaxonomyResult<()> {
        let to = self.policy.apply(to)?;
        let node = self.require_category(category)?;
        self.check_subcategory_name(node, &to)?;
        let id = self
            .find_subcategory(node, from)
            .map(Category::id)
            .ok_or_else(|| TaxonomyError::SubcategoryNotFound(from.to_string()))?;

        if let Some(child) = self.categories.get_mut(&id) {
            child.set_name(to);
        }
        Ok(())
    }

    /// Detaches `field` from `category`. No-op when it is not a member.
    pub fn remove_field(&mut self, category: CategoryId, field: FieldId) -> TaxonomyResult<()> {
        let list = self.require_category_mut(category)?.fields_mut();
        if let Some(index) = list.iter().position(|id| *id == field) {
            list.remove(index);
            self.field_owners.remove(&field);
            debug!(
                "event=field_remove module=taxonomy status=ok category_id={category} field_id={field}"
            );
        }
        Ok(())
    }

    /// Detaches `child` from `parent`. No-op when it is not a member.
    ///
    /// The child subtree stays registered and becomes a root.
    pub fn remove_subcategory(
        &mut self,
        parent: CategoryId,
        child: CategoryId,
    ) -> TaxonomyResult<()> {
        let list = self.require_category_mut(parent)?.subcategories_mut();
        if let Some(index) = list.iter().position(|id| *id == child) {
            list.remove(index);
            self.parents.remove(&child);
            debug!(
                "event=subcategory_remove module=taxonomy status=ok category_id={parent} child_id={child}"
            );
        }
        Ok(())
    }

    /// Detaches and unregisters one field, returning its record.
    pub fn delete_field(&mut self, field: FieldId) -> TaxonomyResult<Field> {
        if let Some(owner) = self.owner_of(field) {
            self.remove_field(owner, field)?;
        }
        let record = self
            .fields
            .remove(&field)
            .ok_or(TaxonomyError::UnknownField(field))?;
        debug!("event=field_delete module=taxonomy status=ok field_id={field}");
        Ok(record)
    }

    /// Detaches and unregisters a category together with its whole subtree.
    ///
    /// Returns the ids of every field purged along the way so callers can
    /// drop values keyed by them.
    pub fn delete_category_subtree(
        &mut self,
        category: CategoryId,
    ) -> TaxonomyResult<Vec<FieldId>> {
        self.require_category(category)?;
        if let Some(parent) = self.parent_of(category) {
            self.remove_subcategory(parent, category)?;
        }

        let mut subtree = Vec::new();
        self.walk_categories(category, |node| subtree.push(node.id()))?;

        let mut purged_fields = Vec::new();
        for id in &subtree {
            self.parents.remove(id);
            let Some(node) = self.categories.remove(id) else {
                continue;
            };
            for field in node.fields() {
                self.field_owners.remove(field);
                self.fields.remove(field);
                purged_fields.push(*field);
            }
        }

        debug!(
            "event=category_delete module=taxonomy status=ok category_id={category} categories={} fields={}",
            subtree.len(),
            purged_fields.len()
        );
        Ok(purged_fields)
    }

    pub(crate) fn require_category(&self, id: CategoryId) -> TaxonomyResult<&Category> {
        self.categories
            .get(&id)
            .ok_or(TaxonomyError::CategoryNotFound(id))
    }

    fn require_category_mut(&mut self, id: CategoryId) -> TaxonomyResult<&mut Category> {
        self.categories
            .get_mut(&id)
            .ok_or(TaxonomyError::CategoryNotFound(id))
    }

    fn find_field(&self, node: &Category, name: &str) -> Option<&Field> {
        node.fields()
            .iter()
            .filter_map(|id| self.fields.get(id))
            .find(|field| field.name() == name)
    }

    fn find_subcategory(&self, node: &Category, name: &str) -> Option<&Category> {
        node.subcategories()
            .iter()
            .filter_map(|id| self.categories.get(id))
            .find(|child| child.name() == name)
    }

    fn check_field_name(&self, node: &Category, name: &str) -> TaxonomyResult<()> {
        if self.find_field(node, name).is_some() {
            return Err(TaxonomyError::DuplicateName(name.to_string()));
        }
        if self.find_subcategory(node, name).is_some() {
            return Err(TaxonomyError::NameCollidesWithSubcategory(name.to_string()));
        }
        Ok(())
    }

    fn check_subcategory_name(&self, node: &Category, name: &str) -> TaxonomyResult<()> {
        if self.find_subcategory(node, name).is_some() {
            return Err(TaxonomyError::DuplicateName(name.to_string()));
        }
        if self.find_field(node, name).is_some() {
            return Err(TaxonomyError::NameCollidesWithField(name.to_string()));
        }
        Ok(())
    }

    fn is_ancestor_or_self(&self, candidate: CategoryId, node: CategoryId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == candidate {
                return true;
            }
            cursor = self.parent_of(current);
        }
        false
    }
}

fn move_within<T>(list: &mut Vec<T>, from: usize, to: usize) -> TaxonomyResult<()> {
    let len = list.len();
    for index in [from, to] {
        if index >= len {
            return Err(TaxonomyError::IndexOutOfRange { index, len });
        }
    }
    let item = list.remove(from);
    list.insert(to, item);
    Ok(())
}

fn log_outcome(event: &str, category: CategoryId, result: &TaxonomyResult<()>) {
    match result {
        Ok(()) => debug!("event={event} module=taxonomy status=ok category_id={category}"),
        Err(err) if err.is_precondition_violation() => warn!(
            "event={event} module=taxonomy status=error category_id={category} error_code={}",
            err.code()
        ),
        Err(err) => debug!(
            "event={event} module=taxonomy status=rejected category_id={category} error_code={}",
            err.code()
        ),
    }
}
