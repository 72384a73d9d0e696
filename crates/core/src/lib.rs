//! # CTB Core
//!
//! Core types, traits, and error handling for the content-type builder.
//!
//! This crate provides the foundational building blocks used by the schema
//! model and the editing store, including:
//!
//! - **Types**: Schema kinds, attribute kinds and relation kinds
//! - **Traits**: `Validatable` for invariant checks
//! - **Errors**: Unified error handling with `BuilderError` and `BuilderResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{BuilderError, BuilderResult, ResultExt};
pub use traits::Validatable;
pub use types::{AttributeType, ContentTypeKind, RelationKind, SchemaKind};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
