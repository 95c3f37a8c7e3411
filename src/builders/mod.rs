//! # Builders
//!
//! Fluent configuration for a search.
//!
//! ## Modules
//!
//! - [`search_builder`] - concurrency cap and deadline for [`crate::search`]

pub mod search_builder;

pub use search_builder::SearchBuilder;
