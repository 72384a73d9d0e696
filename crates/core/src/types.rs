//! Core types used throughout the content-type builder
//!
//! This module contains the scalar vocabulary shared by the schema model and
//! the editing store: what a schema is, what an attribute can be, and how a
//! relation attribute relates to its target.

use serde::{Deserialize, Serialize};

// ============================================================================
// Schema Kinds
// ============================================================================

/// The two kinds of schema the builder edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SchemaKind {
    /// A top-level content type (maps to a collection or a single entry)
    #[default]
    ContentType,
    /// A reusable schema fragment embedded into other schemas
    Component,
}

impl SchemaKind {
    /// Key used for this kind inside the edited document
    pub fn key(&self) -> &'static str {
        match self {
            SchemaKind::ContentType => "contentType",
            SchemaKind::Component => "component",
        }
    }

    /// Only content types may hold a relation to themselves
    pub fn can_self_relate(&self) -> bool {
        matches!(self, SchemaKind::ContentType)
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Content-type-only kind flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ContentTypeKind {
    /// Many entries
    #[default]
    CollectionType,
    /// Exactly one entry
    SingleType,
}

// ============================================================================
// Attribute Types
// ============================================================================

/// Declared type of an attribute
///
/// Types this crate does not know are kept verbatim in `Other` and treated
/// as opaque scalars.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
    Text,
    RichText,
    Email,
    Password,
    Integer,
    BigInteger,
    Float,
    Decimal,
    Date,
    Time,
    DateTime,
    Timestamp,
    Boolean,
    Enumeration,
    Json,
    Uid,
    Media,
    /// Link to another schema
    Relation,
    /// Embedded component
    Component,
    /// Ordered list of component references
    DynamicZone,
    /// Any other type name, e.g. from a plugin
    #[serde(untagged)]
    Other(String),
}

impl AttributeType {
    /// Check if this type links to another schema
    pub fn is_relation(&self) -> bool {
        matches!(self, AttributeType::Relation)
    }
}

// ============================================================================
// Relation Kinds
// ============================================================================

/// Cardinality of a relation attribute
///
/// `OneWay` and `ManyWay` are one-sided: they never carry a reverse attribute
/// on the target. All other kinds are two-sided and are kept in pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    OneWay,
    ManyWay,
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl RelationKind {
    /// Classify a stored relation given whether it names a reverse attribute
    ///
    /// A stored `oneToOne` or `oneToMany` without a reverse name is really the
    /// one-sided `oneWay` or `manyWay`.
    pub fn classify(relation: Option<RelationKind>, target_attribute: Option<&str>) -> Option<Self> {
        let relation = relation?;
        let has_target_attribute = target_attribute.is_some();

        Some(match relation {
            RelationKind::OneToOne if !has_target_attribute => RelationKind::OneWay,
            RelationKind::OneToMany if !has_target_attribute => RelationKind::ManyWay,
            other => other,
        })
    }

    /// Check if this kind never has a reverse attribute
    pub fn is_one_sided(&self) -> bool {
        matches!(self, RelationKind::OneWay | RelationKind::ManyWay)
    }

    /// Check if this kind is kept as a pair of attributes
    pub fn is_two_sided(&self) -> bool {
        !self.is_one_sided()
    }

    /// Get the kind seen from the other side of the pair
    pub fn opposite(&self) -> Self {
        match self {
            RelationKind::ManyToOne => RelationKind::OneToMany,
            RelationKind::OneToMany => RelationKind::ManyToOne,
            other => *other,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            RelationKind::OneWay => "One way",
            RelationKind::ManyWay => "Many way",
            RelationKind::OneToOne => "One to One",
            RelationKind::OneToMany => "One to Many",
            RelationKind::ManyToOne => "Many to One",
            RelationKind::ManyToMany => "Many to Many",
        }
    }

    /// Get all relation kinds
    pub fn all() -> &'static [RelationKind] {
        &[
            RelationKind::OneWay,
            RelationKind::ManyWay,
            RelationKind::OneToOne,
            RelationKind::OneToMany,
            RelationKind::ManyToOne,
            RelationKind::ManyToMany,
        ]
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Check if an optionally classified relation is one-sided
pub fn is_one_sided(kind: Option<RelationKind>) -> bool {
    kind.is_some_and(|k| k.is_one_sided())
}

/// Check if an optionally classified relation is two-sided
pub fn is_two_sided(kind: Option<RelationKind>) -> bool {
    kind.is_some_and(|k| k.is_two_sided())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_without_reverse_name() {
        assert_eq!(
            RelationKind::classify(Some(RelationKind::OneToOne), None),
            Some(RelationKind::OneWay)
        );
        assert_eq!(
            RelationKind::classify(Some(RelationKind::OneToMany), None),
            Some(RelationKind::ManyWay)
        );
        assert_eq!(
            RelationKind::classify(Some(RelationKind::ManyToMany), None),
            Some(RelationKind::ManyToMany)
        );
    }

    #[test]
    fn test_classify_with_reverse_name() {
        assert_eq!(
            RelationKind::classify(Some(RelationKind::OneToOne), Some("owner")),
            Some(RelationKind::OneToOne)
        );
        assert_eq!(
            RelationKind::classify(Some(RelationKind::OneToMany), Some("author")),
            Some(RelationKind::OneToMany)
        );
        assert_eq!(RelationKind::classify(None, Some("author")), None);
    }

    #[test]
    fn test_opposite_is_symmetric() {
        for kind in RelationKind::all() {
            assert_eq!(kind.opposite().opposite(), *kind);
        }
        assert_eq!(RelationKind::ManyToOne.opposite(), RelationKind::OneToMany);
        assert_eq!(RelationKind::OneToOne.opposite(), RelationKind::OneToOne);
        assert_eq!(RelationKind::ManyToMany.opposite(), RelationKind::ManyToMany);
    }

    #[test]
    fn test_sidedness() {
        assert!(RelationKind::OneWay.is_one_sided());
        assert!(RelationKind::ManyWay.is_one_sided());
        assert!(RelationKind::ManyToOne.is_two_sided());
        assert!(!is_one_sided(None));
        assert!(!is_two_sided(None));
        assert!(is_two_sided(Some(RelationKind::OneToOne)));
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&RelationKind::ManyToMany).unwrap(),
            "\"manyToMany\""
        );
        assert_eq!(
            serde_json::to_string(&AttributeType::DynamicZone).unwrap(),
            "\"dynamiczone\""
        );
        assert_eq!(
            serde_json::to_string(&SchemaKind::ContentType).unwrap(),
            "\"contentType\""
        );
        let kind: ContentTypeKind = serde_json::from_str("\"singleType\"").unwrap();
        assert_eq!(kind, ContentTypeKind::SingleType);
    }

    #[test]
    fn test_attribute_type_groups() {
        assert!(AttributeType::Relation.is_relation());
        assert!(!AttributeType::Component.is_relation());
    }

    #[test]
    fn test_unknown_attribute_type_round_trips() {
        let ty: AttributeType = serde_json::from_str("\"customfield\"").unwrap();
        assert_eq!(ty, AttributeType::Other("customfield".to_string()));
        assert!(!ty.is_relation());
        assert_eq!(serde_json::to_string(&ty).unwrap(), "\"customfield\"");

        let known: AttributeType = serde_json::from_str("\"richtext\"").unwrap();
        assert_eq!(known, AttributeType::RichText);
    }
}
