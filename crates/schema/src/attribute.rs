//! Attribute definitions for schemas
//!
//! This module contains the `Attribute` struct: one named field of a content
//! type or component. The name is the key in the owning schema's attribute
//! map, so it is not stored on the attribute itself.

use ctb_core::{AttributeType, BuilderError, BuilderResult, RelationKind, Validatable};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn is_false(value: &bool) -> bool {
    !*value
}

// ============================================================================
// Attribute
// ============================================================================

/// Represents a named field within a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    /// Declared type of the attribute
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,

    /// Relation cardinality (relations only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<RelationKind>,

    /// Target schema uid (relations only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Name of the reverse attribute on the target (two-sided relations only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_attribute: Option<String>,

    /// Hidden from API responses
    #[serde(default, skip_serializing_if = "is_false")]
    pub private: bool,

    /// Referenced component uid (component attributes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,

    /// Whether a component attribute holds a list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeatable: Option<bool>,

    /// Allowed component uids (dynamic zones only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<String>>,

    /// Name of another attribute this one derives from (e.g. a uid field)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_field: Option<String>,

    /// Type-specific configuration the store does not interpret
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl Attribute {
    /// Create a new attribute of the given type
    pub fn new(attribute_type: AttributeType) -> Self {
        Self {
            attribute_type,
            relation: None,
            target: None,
            target_attribute: None,
            private: false,
            component: None,
            repeatable: None,
            components: None,
            target_field: None,
            options: Map::new(),
        }
    }

    /// Create a relation attribute
    pub fn relation(kind: RelationKind, target: impl Into<String>) -> Self {
        let mut attribute = Self::new(AttributeType::Relation);
        attribute.relation = Some(kind);
        attribute.target = Some(target.into());
        attribute
    }

    /// Create a component attribute
    pub fn component(uid: impl Into<String>, repeatable: bool) -> Self {
        let mut attribute = Self::new(AttributeType::Component);
        attribute.component = Some(uid.into());
        attribute.repeatable = Some(repeatable);
        attribute
    }

    /// Create a dynamic zone attribute
    pub fn dynamic_zone<I, S>(uids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut attribute = Self::new(AttributeType::DynamicZone);
        attribute.components = Some(uids.into_iter().map(Into::into).collect());
        attribute
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the reverse attribute name
    pub fn with_target_attribute(mut self, name: impl Into<String>) -> Self {
        self.target_attribute = Some(name.into());
        self
    }

    /// Mark as private
    pub fn private(mut self) -> Self {
        self.private = true;
        self
    }

    /// Set the source attribute of a derived field
    pub fn with_target_field(mut self, name: impl Into<String>) -> Self {
        self.target_field = Some(name.into());
        self
    }

    /// Add an opaque configuration value
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    /// Check if this is a relation attribute
    pub fn is_relation(&self) -> bool {
        self.attribute_type.is_relation()
    }

    /// Check if this is a dynamic zone
    pub fn is_dynamic_zone(&self) -> bool {
        matches!(self.attribute_type, AttributeType::DynamicZone)
    }

    /// Classified relation kind, taking the reverse name into account
    pub fn relation_kind(&self) -> Option<RelationKind> {
        RelationKind::classify(self.relation, self.target_attribute.as_deref())
    }

    /// Check if this attribute targets the given schema uid
    pub fn targets(&self, uid: &str) -> bool {
        self.target.as_deref() == Some(uid)
    }

    /// Check if this is a two-sided relation pointing back at `uid`
    pub fn is_paired_self_relation(&self, uid: &str) -> bool {
        self.is_relation()
            && self.targets(uid)
            && self.relation_kind().is_some_and(|kind| kind.is_two_sided())
    }

    /// Copy keeping only the relation fields
    ///
    /// Relation edits rewrite both sides of a pair with this shape, dropping
    /// any unrelated configuration the attribute carried before.
    pub fn relation_only(&self) -> Self {
        let mut attribute = Self::new(AttributeType::Relation);
        attribute.relation = self.relation;
        attribute.target = self.target.clone();
        attribute.target_attribute = self.target_attribute.clone();
        attribute.private = self.private;
        attribute
    }
}

impl Validatable for Attribute {
    fn validate(&self) -> BuilderResult<()> {
        match self.attribute_type {
            AttributeType::Relation => {
                if self.relation.is_none() {
                    return Err(BuilderError::validation(
                        "Relation attribute must declare a relation kind",
                    ));
                }
                if self.target.as_deref().is_none_or(str::is_empty) {
                    return Err(BuilderError::validation(
                        "Relation attribute must declare a target",
                    ));
                }
                if self.relation.is_some_and(|r| r.is_one_sided()) && self.target_attribute.is_some()
                {
                    return Err(BuilderError::validation(
                        "One-sided relation cannot name a reverse attribute",
                    ));
                }
            }
            AttributeType::Component => {
                if self.component.is_none() {
                    return Err(BuilderError::validation(
                        "Component attribute must reference a component",
                    ));
                }
            }
            AttributeType::DynamicZone => {
                if self.components.is_none() {
                    return Err(BuilderError::validation(
                        "Dynamic zone must list its components",
                    ));
                }
            }
            _ => {}
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
