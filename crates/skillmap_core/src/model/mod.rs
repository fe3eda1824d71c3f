//! Read-side domain model for the skills directory.
//!
//! # Responsibility
//! - Define the raw record shapes accepted at the data-source boundary.
//! - Define the canonical shapes consumed by aggregation, dataset building
//!   and filtering.
//!
//! # Invariants
//! - Raw shapes (`*Record`, `CatalogEntry`) are untrusted and never reach
//!   core algorithms without passing through normalization.
//! - Canonical shapes are rebuilt on every fetch and never mutated in place.

pub mod employee;
pub mod skill;
pub mod technology;
