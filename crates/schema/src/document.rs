//! The edited document and the snapshots that feed it
//!
//! `EditingDocument` holds the single schema currently open in the editor
//! together with the components it displays. Edits address it through an
//! `EditTarget`, which resolves to the main schema or to one nested component.

use crate::schema::{Components, ContentTypes, Schema};
use ctb_core::{BuilderError, BuilderResult, SchemaKind, Validatable};
use serde::{Deserialize, Serialize};

// ============================================================================
// EditTarget
// ============================================================================

/// Path to the schema an attribute edit applies to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditTarget {
    /// The edited content type
    ContentType,
    /// The edited component
    Component,
    /// A component displayed inside the edited document
    #[serde(rename = "components")]
    NestedComponent(String),
}

impl EditTarget {
    /// Target for the main schema of the given kind
    pub fn main(kind: SchemaKind) -> Self {
        match kind {
            SchemaKind::ContentType => EditTarget::ContentType,
            SchemaKind::Component => EditTarget::Component,
        }
    }

    /// Human-readable path, used in errors and logs
    pub fn describe(&self) -> String {
        match self {
            EditTarget::ContentType => "contentType".to_string(),
            EditTarget::Component => "component".to_string(),
            EditTarget::NestedComponent(uid) => format!("components.{}", uid),
        }
    }
}

impl std::fmt::Display for EditTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

// ============================================================================
// EditingDocument
// ============================================================================

/// The schema being edited plus the components it displays
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditingDocument {
    /// Edited content type, when editing a content type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<Schema>,

    /// Edited component, when editing a component
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<Schema>,

    /// Components referenced (directly or transitively) by the edited schema
    #[serde(default)]
    pub components: Components,
}

impl EditingDocument {
    /// Document editing a content type
    pub fn for_content_type(schema: Schema, components: Components) -> Self {
        Self {
            content_type: Some(schema),
            component: None,
            components,
        }
    }

    /// Document editing a component
    pub fn for_component(schema: Schema, components: Components) -> Self {
        Self {
            content_type: None,
            component: Some(schema),
            components,
        }
    }

    /// Check if nothing is being edited
    pub fn is_empty(&self) -> bool {
        self.content_type.is_none() && self.component.is_none()
    }

    /// The edited schema, whichever kind it is
    pub fn edited(&self) -> Option<&Schema> {
        self.content_type.as_ref().or(self.component.as_ref())
    }

    /// Main schema of the given kind
    pub fn main(&self, kind: SchemaKind) -> BuilderResult<&Schema> {
        match kind {
            SchemaKind::ContentType => self.content_type.as_ref(),
            SchemaKind::Component => self.component.as_ref(),
        }
        .ok_or_else(|| BuilderError::EditTargetMissing(kind.key().to_string()))
    }

    /// Mutable main schema of the given kind
    pub fn main_mut(&mut self, kind: SchemaKind) -> BuilderResult<&mut Schema> {
        match kind {
            SchemaKind::ContentType => self.content_type.as_mut(),
            SchemaKind::Component => self.component.as_mut(),
        }
        .ok_or_else(|| BuilderError::EditTargetMissing(kind.key().to_string()))
    }

    /// Resolve an edit target to its schema
    pub fn resolve(&self, target: &EditTarget) -> BuilderResult<&Schema> {
        match target {
            EditTarget::ContentType => self.main(SchemaKind::ContentType),
            EditTarget::Component => self.main(SchemaKind::Component),
            EditTarget::NestedComponent(uid) => self
                .components
                .get(uid)
                .ok_or_else(|| BuilderError::EditTargetMissing(target.describe())),
        }
    }

    /// Resolve an edit target to its mutable schema
    pub fn resolve_mut(&mut self, target: &EditTarget) -> BuilderResult<&mut Schema> {
        match target {
            EditTarget::ContentType => self.main_mut(SchemaKind::ContentType),
            EditTarget::Component => self.main_mut(SchemaKind::Component),
            EditTarget::NestedComponent(uid) => self
                .components
                .get_mut(uid)
                .ok_or_else(|| BuilderError::EditTargetMissing(target.describe())),
        }
    }
}

impl Validatable for EditingDocument {
    fn validate(&self) -> BuilderResult<()> {
        if let Some(schema) = self.edited() {
            schema.validate()?;
        }
        for component in self.components.values() {
            component.validate()?;
        }
        Ok(())
    }
}

// ============================================================================
// ReservedNames
// ============================================================================

/// Names the backend refuses for models and attributes
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservedNames {
    /// Reserved schema names
    pub models: Vec<String>,
    /// Reserved attribute names
    pub attributes: Vec<String>,
}

impl ReservedNames {
    /// Check a schema name, ignoring case
    pub fn is_reserved_model(&self, name: &str) -> bool {
        self.models.iter().any(|m| m.eq_ignore_ascii_case(name))
    }

    /// Check an attribute name, ignoring case
    pub fn is_reserved_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

// ============================================================================
// DataSnapshot
// ============================================================================

/// Everything the loading collaborator hands over on navigation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataSnapshot {
    /// All known components
    pub components: Components,
    /// All known content types
    pub content_types: ContentTypes,
    /// Reserved name lookup
    pub reserved_names: ReservedNames,
}

// ============================================================================
// Tests
// ============================================================================
