//! Directory search entry points.
//!
//! # Responsibility
//! - Filter in-memory employee collections by text and skill tags.
//! - Keep tag normalization identical to catalog matching.

pub mod filter;
