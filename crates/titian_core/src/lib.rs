//! Core domain logic for Titian contact management.
//! This crate is the single source of truth for taxonomy and contact invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod taxonomy;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{Category, CategoryId};
pub use model::contact::{
    Contact, ContactId, ContactValidationError, EmailAddress, FieldValue,
};
pub use model::field::{Field, FieldId, FieldValidationError};
pub use model::group::{Group, GroupId};
pub use repo::contact_repo::{
    ContactRepoError, ContactRepoResult, ContactRepository, InMemoryContactRepository,
};
pub use service::contact_service::{
    ContactResult, ContactService, ContactServiceError, SchemaEntry,
};
pub use taxonomy::error::{TaxonomyError, TaxonomyResult};
pub use taxonomy::policy::NamePolicy;
pub use taxonomy::tree::Taxonomy;

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
