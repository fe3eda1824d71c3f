//! Skill aggregation and catalog-alignment engine.
//!
//! # Responsibility
//! - Normalize raw skill records into the canonical shape.
//! - Group normalized skills by specialty and derive summary statistics.
//! - Project skills onto the ordered technology catalog for multi-axis charts.
//! - Own the single specialty → color table used by every consumer.
//!
//! # Invariants
//! - Every catalog match goes through [`matching::match_key`].
//! - Every dataset vector has exactly the catalog's length.
//! - All functions here are pure and total.

pub mod aggregate;
pub mod catalog;
pub mod dataset;
pub mod matching;
pub mod normalize;
pub mod palette;
