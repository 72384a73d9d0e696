//! Session state for the schema editor
//!
//! One `SessionState` value is one complete, consistent snapshot. The
//! `initial*` fields hold the last externally loaded versions and are the
//! rollback target; editing actions never touch them.

use ctb_core::{BuilderResult, Validatable};
use ctb_schema::{Components, ContentTypes, EditingDocument, ReservedNames, Schema};
use serde::{Deserialize, Serialize};

/// Editable state of the schema editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// Component registry, including components created in this session
    pub components: Components,

    /// Content type registry, including content types created in this session
    pub content_types: ContentTypes,

    /// Component registry as last loaded
    pub initial_components: Components,

    /// Content type registry as last loaded
    pub initial_content_types: ContentTypes,

    /// Edited document as last opened
    pub initial_data: EditingDocument,

    /// Edited document with in-progress changes
    pub modified_data: EditingDocument,

    /// Reserved name lookup
    pub reserved_names: ReservedNames,

    /// Registries have not been loaded yet
    pub is_loading: bool,

    /// No schema has been opened yet
    pub is_loading_for_data_to_be_set: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            components: Components::new(),
            content_types: ContentTypes::new(),
            initial_components: Components::new(),
            initial_content_types: ContentTypes::new(),
            initial_data: EditingDocument::default(),
            modified_data: EditingDocument::default(),
            reserved_names: ReservedNames::default(),
            is_loading: true,
            is_loading_for_data_to_be_set: true,
        }
    }
}

impl SessionState {
    /// Create the empty initial state
    pub fn new() -> Self {
        Self::default()
    }

    /// Uid of the schema being edited
    pub fn edited_uid(&self) -> Option<&str> {
        self.modified_data.edited().map(|s| s.uid.as_str())
    }

    /// Check if anything differs from the last loaded versions
    pub fn has_unsaved_changes(&self) -> bool {
        self.modified_data != self.initial_data
            || self.components != self.initial_components
            || self.content_types != self.initial_content_types
    }

    /// Sorted, distinct component categories
    pub fn component_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .components
            .values()
            .filter_map(|c| c.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Schemas created in this session and not yet persisted
    pub fn temporary_schemas(&self) -> impl Iterator<Item = &Schema> {
        self.content_types
            .values()
            .chain(self.components.values())
            .filter(|s| s.is_temporary)
    }
}

impl Validatable for SessionState {
    fn validate(&self) -> BuilderResult<()> {
        self.modified_data.validate()
    }
}

// ============================================================================
// Tests
// ============================================================================
