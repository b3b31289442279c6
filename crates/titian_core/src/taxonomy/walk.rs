//! Pre-order traversal over a category subtree.
//!
//! Visitors receive shared references, so the tree cannot be mutated while a
//! walk is in progress.

use crate::model::category::{Category, CategoryId};
use crate::model::field::Field;
use crate::taxonomy::error::TaxonomyResult;
use crate::taxonomy::tree::Taxonomy;

impl Taxonomy {
    /// Visits `root`, then each subcategory subtree in list order.
    ///
    /// A child's whole subtree is visited before its next sibling
    /// (depth-first pre-order).
    pub fn walk_categories<'a, F>(&'a self, root: CategoryId, mut visit: F) -> TaxonomyResult<()>
    where
        F: FnMut(&'a Category),
    {
        self.require_category(root)?;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.category(id) else {
                continue;
            };
            visit(node);
            stack.extend(node.subcategories().iter().rev().copied());
        }
        Ok(())
    }

    /// Visits the direct fields of every category reached by
    /// [`Taxonomy::walk_categories`], each in field-list order.
    pub fn walk_fields<'a, F>(&'a self, root: CategoryId, mut visit: F) -> TaxonomyResult<()>
    where
        F: FnMut(&'a Field),
    {
        self.walk_categories(root, |node| {
            for field in node.fields().iter().filter_map(|id| self.field(*id)) {
                visit(field);
            }
        })
    }

    /// Category ids of the subtree rooted at `root`, in walk order.
    pub fn category_ids(&self, root: CategoryId) -> TaxonomyResult<Vec<CategoryId>> {
        let mut ids = Vec::new();
        self.walk_categories(root, |node| ids.push(node.id()))?;
        Ok(ids)
    }
}
