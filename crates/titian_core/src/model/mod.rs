//! Domain model for contacts and their field taxonomy.
//!
//! # Responsibility
//! - Define canonical records: fields, categories, contacts, groups.
//! - Keep identity explicit through stable UUID ids.
//!
//! # Invariants
//! - Every record is identified by a stable id, never by its name.
//! - Category children are id lists; the taxonomy arena owns the records.

pub mod category;
pub mod contact;
pub mod field;
pub mod group;
