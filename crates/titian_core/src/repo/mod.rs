//! Repository layer abstractions.
//!
//! # Responsibility
//! - Define storage contracts used by services.
//! - Keep storage details out of service orchestration.

pub mod contact_repo;
