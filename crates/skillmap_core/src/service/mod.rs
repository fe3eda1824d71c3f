//! Use-case services for directory consumers.
//!
//! # Responsibility
//! - Join source fetches per view and run the core pipeline.
//! - Expose explicit per-fetch state instead of loading/error flags.

pub mod directory_service;
pub mod view_state;
