//! Category/field taxonomy.
//!
//! # Responsibility
//! - Own category and field records in an id-keyed arena.
//! - Enforce per-category name uniqueness across fields and subcategories.
//! - Walk category subtrees in pre-order.
//!
//! # Invariants
//! - Uniqueness checks run before the single mutating step of each operation.
//! - No internal locking; callers serialize access to one taxonomy.

pub mod error;
pub mod policy;
pub mod tree;
mod walk;
