//! # CTB Schema
//!
//! The in-memory document model edited by the content-type builder.
//!
//! ## Core Concepts
//!
//! - **Schema**: A content type or a component, with an ordered attribute map
//! - **Attribute**: A named field on a schema; scalar, relation, component or dynamic zone
//! - **EditingDocument**: The schema being edited plus the components it displays
//! - **Relation pair**: Two relation attributes whose `target`/`targetAttribute` point at each other
//!

// Module declarations
pub mod attribute;
pub mod document;
pub mod relation_helpers;
pub mod schema;
pub mod serialization;

// Re-export commonly used types at crate root
pub use attribute::Attribute;
pub use document::{DataSnapshot, EditTarget, EditingDocument, ReservedNames};
pub use relation_helpers::{
    clear_target_field_references, make_unique, mirror_attribute, retrieve_components_from_schema,
};
pub use schema::{Attributes, Components, ContentTypes, Schema};
pub use serialization::{
    load_document, load_snapshot, load_snapshot_from_str, read_json, save_snapshot, write_json,
};

// Re-export core types that are commonly used with the schema model
pub use ctb_core::{
    AttributeType, BuilderError, BuilderResult, ContentTypeKind, RelationKind, SchemaKind,
    Validatable,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient re-exports for common usage
pub mod prelude {
    pub use crate::{
        Attribute,
        // Re-exported from core
        AttributeType,
        Attributes,
        BuilderError,
        BuilderResult,
        Components,
        ContentTypeKind,
        ContentTypes,
        DataSnapshot,
        EditTarget,
        EditingDocument,
        RelationKind,
        ReservedNames,
        Schema,
        SchemaKind,
        Validatable,
    };
}
