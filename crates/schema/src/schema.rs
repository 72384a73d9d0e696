//! Schema definitions for content types and components
//!
//! A `Schema` is the editable definition of one content type or component:
//! identity, display metadata and an ordered attribute map. Insertion order
//! of the attribute map is significant and preserved across edits.

use crate::attribute::Attribute;
use ctb_core::{BuilderError, BuilderResult, ContentTypeKind, SchemaKind, Validatable};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered attribute map, keyed by attribute name
pub type Attributes = IndexMap<String, Attribute>;

/// Component registry, keyed by uid
pub type Components = IndexMap<String, Schema>;

/// Content type registry, keyed by uid
pub type ContentTypes = IndexMap<String, Schema>;

fn is_false(value: &bool) -> bool {
    !*value
}

// ============================================================================
// Schema
// ============================================================================

/// A content type or component definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Unique identifier (e.g. `api::article.article`, `default.seo`)
    pub uid: String,

    /// Content type or component
    #[serde(default)]
    pub kind: SchemaKind,

    /// Created in this session and never persisted
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_temporary: bool,

    /// Category (components only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Display name
    pub name: String,

    /// Storage name
    #[serde(default)]
    pub collection_name: String,

    /// Icon (components only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Collection or single type (content types only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type_kind: Option<ContentTypeKind>,

    /// Attributes in declaration order
    #[serde(default)]
    pub attributes: Attributes,
}

impl Schema {
    /// Create a new content type
    pub fn content_type(uid: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            uid: uid.into(),
            kind: SchemaKind::ContentType,
            is_temporary: false,
            category: None,
            collection_name: name.to_lowercase(),
            name,
            icon: None,
            content_type_kind: Some(ContentTypeKind::CollectionType),
            attributes: Attributes::new(),
        }
    }

    /// Create a new component
    pub fn component(
        uid: impl Into<String>,
        category: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            uid: uid.into(),
            kind: SchemaKind::Component,
            is_temporary: false,
            category: Some(category.into()),
            collection_name: name.to_lowercase(),
            name,
            icon: None,
            content_type_kind: None,
            attributes: Attributes::new(),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Append an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    /// Set the storage name
    pub fn with_collection_name(mut self, collection_name: impl Into<String>) -> Self {
        self.collection_name = collection_name.into();
        self
    }

    /// Set the icon
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Mark as created in this session
    pub fn temporary(mut self) -> Self {
        self.is_temporary = true;
        self
    }

    // ========================================================================
    // Attribute access
    // ========================================================================

    /// Get an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Get a mutable attribute by name
    pub fn attribute_mut(&mut self, name: &str) -> Option<&mut Attribute> {
        self.attributes.get_mut(name)
    }

    /// Get an attribute or fail with `AttributeNotFound`
    pub fn require_attribute(&self, name: &str) -> BuilderResult<&Attribute> {
        self.attribute(name)
            .ok_or_else(|| BuilderError::attribute_not_found(&self.uid, name))
    }

    /// Get a mutable attribute or fail with `AttributeNotFound`
    pub fn require_attribute_mut(&mut self, name: &str) -> BuilderResult<&mut Attribute> {
        let uid = self.uid.clone();
        self.attributes
            .get_mut(name)
            .ok_or_else(|| BuilderError::attribute_not_found(uid, name))
    }

    /// Check if an attribute exists
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Attribute names in order
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.keys().map(String::as_str).collect()
    }

    /// Number of relation attributes
    pub fn relation_count(&self) -> usize {
        self.attributes.values().filter(|a| a.is_relation()).count()
    }

    /// Check if this is a component
    pub fn is_component(&self) -> bool {
        matches!(self.kind, SchemaKind::Component)
    }

    fn validate_self_relation(&self, name: &str, attribute: &Attribute) -> BuilderResult<()> {
        let Some(kind) = attribute.relation_kind() else {
            return Ok(());
        };
        let Some(mirror_name) = attribute.target_attribute.as_deref() else {
            return Err(BuilderError::relation_validation(
                &self.uid,
                name,
                "two-sided self-relation has no reverse attribute name",
            ));
        };
        let Some(mirror) = self.attribute(mirror_name) else {
            return Err(BuilderError::relation_validation(
                &self.uid,
                name,
                format!("reverse attribute '{}' is missing", mirror_name),
            ));
        };

        if !mirror.targets(&self.uid) {
            return Err(BuilderError::relation_validation(
                &self.uid,
                mirror_name,
                "reverse attribute does not target its owner",
            ));
        }
        if mirror.target_attribute.as_deref() != Some(name) {
            return Err(BuilderError::relation_validation(
                &self.uid,
                mirror_name,
                format!("reverse attribute does not point back at '{}'", name),
            ));
        }
        if mirror.relation_kind() != Some(kind.opposite()) {
            return Err(BuilderError::relation_validation(
                &self.uid,
                mirror_name,
                format!("expected {} on the reverse side", kind.opposite()),
            ));
        }

        Ok(())
    }
}

impl Validatable for Schema {
    fn validate(&self) -> BuilderResult<()> {
        if self.uid.is_empty() {
            return Err(BuilderError::validation("Schema uid cannot be empty"));
        }

        for (name, attribute) in &self.attributes {
            attribute
                .validate()
                .map_err(|e| BuilderError::relation_validation(&self.uid, name, e.to_string()))?;

            if attribute.is_paired_self_relation(&self.uid) {
                self.validate_self_relation(name, attribute)?;
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ctb_core::{AttributeType, RelationKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_content_type_new() {
        let schema = Schema::content_type("api::article.article", "Article");
        assert_eq!(schema.kind, SchemaKind::ContentType);
        assert_eq!(schema.collection_name, "article");
        assert_eq!(schema.content_type_kind, Some(ContentTypeKind::CollectionType));
        assert!(schema.attributes.is_empty());
    }

    #[test]
    fn test_attribute_order_is_insertion_order() {
        let schema = Schema::content_type("article", "Article")
            .with_attribute("title", Attribute::new(AttributeType::String))
            .with_attribute("body", Attribute::new(AttributeType::RichText))
            .with_attribute("author", Attribute::relation(RelationKind::OneWay, "user"));

        assert_eq!(schema.attribute_names(), vec!["title", "body", "author"]);
        assert_eq!(schema.relation_count(), 1);
    }

    #[test]
    fn test_require_attribute() {
        let schema = Schema::component("default.seo", "default", "Seo");
        let err = schema.require_attribute("title").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_paired_self_relation_is_valid() {
        let schema = Schema::content_type("person", "Person")
            .with_attribute(
                "friends",
                Attribute::relation(RelationKind::ManyToMany, "person")
                    .with_target_attribute("friendsOf"),
            )
            .with_attribute(
                "friendsOf",
                Attribute::relation(RelationKind::ManyToMany, "person")
                    .with_target_attribute("friends"),
            );

        assert!(schema.is_valid());
    }

    #[test]
    fn test_single_attribute_self_pair_is_valid() {
        let schema = Schema::content_type("article", "Article").with_attribute(
            "related",
            Attribute::relation(RelationKind::ManyToMany, "article").with_target_attribute("related"),
        );

        assert!(schema.is_valid());
    }

    #[test]
    fn test_missing_mirror_is_invalid() {
        let schema = Schema::content_type("person", "Person").with_attribute(
            "parent",
            Attribute::relation(RelationKind::ManyToOne, "person").with_target_attribute("children"),
        );

        let err = schema.validate().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("children"));
    }

    #[test]
    fn test_mirror_with_wrong_cardinality_is_invalid() {
        let schema = Schema::content_type("person", "Person")
            .with_attribute(
                "parent",
                Attribute::relation(RelationKind::ManyToOne, "person")
                    .with_target_attribute("children"),
            )
            .with_attribute(
                "children",
                Attribute::relation(RelationKind::ManyToOne, "person")
                    .with_target_attribute("parent"),
            );

        assert!(!schema.is_valid());
    }

    #[test]
    fn test_relation_to_other_schema_needs_no_mirror() {
        let schema = Schema::content_type("article", "Article").with_attribute(
            "author",
            Attribute::relation(RelationKind::ManyToOne, "user").with_target_attribute("articles"),
        );

        assert!(schema.is_valid());
    }
}
