//! Edit intents accepted by the store
//!
//! Each variant is one named action with its payload. The serde form uses
//! the action constants as a `type` tag so recorded action logs can be
//! replayed from JSON.

use ctb_core::{ContentTypeKind, SchemaKind};
use ctb_schema::{
    Attribute, Components, ContentTypes, EditTarget, EditingDocument, ReservedNames, Schema,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Payload Types
// ============================================================================

/// An attribute together with its name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedAttribute {
    /// Attribute name (key in the owning schema)
    pub name: String,

    /// Attribute definition
    #[serde(flatten)]
    pub attribute: Attribute,
}

impl NamedAttribute {
    /// Pair a name with an attribute
    pub fn new(name: impl Into<String>, attribute: Attribute) -> Self {
        Self {
            name: name.into(),
            attribute,
        }
    }
}

/// Schema metadata entered in the create/edit schema forms
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaData {
    /// Display name
    pub name: String,

    /// Storage name
    #[serde(default)]
    pub collection_name: String,

    /// Category (components only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Icon (components only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Collection or single type (content types only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ContentTypeKind>,
}

impl SchemaData {
    /// Metadata with a display name and storage name
    pub fn new(name: impl Into<String>, collection_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collection_name: collection_name.into(),
            ..Default::default()
        }
    }

    /// Build a fresh, temporary schema with no attributes
    pub fn to_temporary_schema(&self, uid: &str, kind: SchemaKind) -> Schema {
        Schema {
            uid: uid.to_string(),
            kind,
            is_temporary: true,
            category: self.category.clone(),
            name: self.name.clone(),
            collection_name: self.collection_name.clone(),
            icon: self.icon.clone(),
            content_type_kind: self.kind,
            attributes: Default::default(),
        }
    }
}

// ============================================================================
// Action
// ============================================================================

/// Every edit intent the store understands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    /// Registries loaded from the backend
    GetDataSucceeded {
        #[serde(default)]
        components: Components,
        #[serde(default)]
        content_types: ContentTypes,
        #[serde(default)]
        reserved_names: ReservedNames,
    },

    /// Open a schema in the editor
    SetModifiedData {
        schema_to_set: EditingDocument,
        #[serde(default)]
        has_just_created_schema: bool,
    },

    /// Create a temporary content type
    CreateSchema { uid: String, data: SchemaData },

    /// Create a temporary component
    CreateComponentSchema {
        uid: String,
        data: SchemaData,
        component_category: String,
        #[serde(default)]
        should_add_component_to_data: bool,
    },

    /// Add an attribute to the edited document
    AddAttribute {
        attribute_to_set: NamedAttribute,
        for_target: EditTarget,
        #[serde(default)]
        should_add_component_to_data: bool,
    },

    /// Rename or retype an existing attribute
    EditAttribute {
        attribute_to_set: NamedAttribute,
        for_target: EditTarget,
        initial_attribute: NamedAttribute,
    },

    /// Remove an attribute from the edited schema
    RemoveField {
        main_data_key: SchemaKind,
        attribute_to_remove_name: String,
    },

    /// Remove an attribute from a displayed component
    RemoveFieldFromDisplayedComponent {
        component_uid: String,
        attribute_to_remove_name: String,
    },

    /// Append freshly created components to a dynamic zone
    AddCreatedComponentToDynamicZone {
        dynamic_zone_target: String,
        components_to_add: Vec<String>,
    },

    /// Merge components into a dynamic zone
    ChangeDynamicZoneComponents {
        dynamic_zone_target: String,
        new_components: Vec<String>,
    },

    /// Remove one entry from a dynamic zone
    RemoveComponentFromDynamicZone {
        dz_name: String,
        component_to_remove_index: usize,
    },

    /// Rewrite the edited schema's metadata
    UpdateSchema {
        data: SchemaData,
        schema_type: SchemaKind,
        uid: String,
    },

    /// Drop in-progress edits
    CancelChanges,

    /// Drop a never-persisted schema
    DeleteNotSavedType,

    /// Back to the empty initial state
    ReloadPlugin,
}

impl Action {
    /// Action constant, for logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::GetDataSucceeded { .. } => "GET_DATA_SUCCEEDED",
            Action::SetModifiedData { .. } => "SET_MODIFIED_DATA",
            Action::CreateSchema { .. } => "CREATE_SCHEMA",
            Action::CreateComponentSchema { .. } => "CREATE_COMPONENT_SCHEMA",
            Action::AddAttribute { .. } => "ADD_ATTRIBUTE",
            Action::EditAttribute { .. } => "EDIT_ATTRIBUTE",
            Action::RemoveField { .. } => "REMOVE_FIELD",
            Action::RemoveFieldFromDisplayedComponent { .. } => {
                "REMOVE_FIELD_FROM_DISPLAYED_COMPONENT"
            }
            Action::AddCreatedComponentToDynamicZone { .. } => {
                "ADD_CREATED_COMPONENT_TO_DYNAMIC_ZONE"
            }
            Action::ChangeDynamicZoneComponents { .. } => "CHANGE_DYNAMIC_ZONE_COMPONENTS",
            Action::RemoveComponentFromDynamicZone { .. } => "REMOVE_COMPONENT_FROM_DYNAMIC_ZONE",
            Action::UpdateSchema { .. } => "UPDATE_SCHEMA",
            Action::CancelChanges => "CANCEL_CHANGES",
            Action::DeleteNotSavedType => "DELETE_NOT_SAVED_TYPE",
            Action::ReloadPlugin => "RELOAD_PLUGIN",
        }
    }

    /// Check if this action is a user edit that can be undone
    ///
    /// Loading data, opening a schema and reloading replace the session
    /// wholesale, so they start a fresh history instead.
    pub fn is_undoable(&self) -> bool {
        !matches!(
            self,
            Action::GetDataSucceeded { .. } | Action::SetModifiedData { .. } | Action::ReloadPlugin
        )
    }

    // ========================================================================
    // Constructors
    // ========================================================================

    /// Load registries
    pub fn load(components: Components, content_types: ContentTypes) -> Self {
        Action::GetDataSucceeded {
            components,
            content_types,
            reserved_names: ReservedNames::default(),
        }
    }

    /// Open an existing schema
    pub fn open(document: EditingDocument) -> Self {
        Action::SetModifiedData {
            schema_to_set: document,
            has_just_created_schema: false,
        }
    }

    /// Add an attribute without pulling in components
    pub fn add_attribute(target: EditTarget, name: impl Into<String>, attribute: Attribute) -> Self {
        Action::AddAttribute {
            attribute_to_set: NamedAttribute::new(name, attribute),
            for_target: target,
            should_add_component_to_data: false,
        }
    }

    /// Replace the attribute `initial_name` with `name`
    pub fn edit_attribute(
        target: EditTarget,
        initial: NamedAttribute,
        name: impl Into<String>,
        attribute: Attribute,
    ) -> Self {
        Action::EditAttribute {
            attribute_to_set: NamedAttribute::new(name, attribute),
            for_target: target,
            initial_attribute: initial,
        }
    }

    /// Remove an attribute from the main schema
    pub fn remove_field(kind: SchemaKind, name: impl Into<String>) -> Self {
        Action::RemoveField {
            main_data_key: kind,
            attribute_to_remove_name: name.into(),
        }
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
    use serde_json::json;

    #[test]
    fn test_unit_action_serde() {
        assert_eq!(
            serde_json::to_value(Action::CancelChanges).unwrap(),
            json!({ "type": "CANCEL_CHANGES" })
        );
        let action: Action = serde_json::from_value(json!({ "type": "RELOAD_PLUGIN" })).unwrap();
        assert_eq!(action, Action::ReloadPlugin);
    }

    #[test]
    fn test_add_attribute_from_json() {
        let action: Action = serde_json::from_value(json!({
            "type": "ADD_ATTRIBUTE",
            "attributeToSet": {
                "name": "related",
                "type": "relation",
                "relation": "manyToMany",
                "target": "article",
                "targetAttribute": "related"
            },
            "forTarget": "contentType"
        }))
        .unwrap();

        let expected = Action::add_attribute(
            EditTarget::ContentType,
            "related",
            Attribute::relation(RelationKind::ManyToMany, "article").with_target_attribute("related"),
        );
        assert_eq!(action, expected);
        assert_eq!(action.name(), "ADD_ATTRIBUTE");
    }

    #[test]
    fn test_nested_target_from_json() {
        let action: Action = serde_json::from_value(json!({
            "type": "ADD_ATTRIBUTE",
            "attributeToSet": { "name": "url", "type": "string" },
            "forTarget": { "components": "default.link" },
            "shouldAddComponentToData": false
        }))
        .unwrap();

        match action {
            Action::AddAttribute {
                for_target,
                attribute_to_set,
                ..
            } => {
                assert_eq!(for_target, EditTarget::NestedComponent("default.link".to_string()));
                assert_eq!(attribute_to_set.attribute.attribute_type, AttributeType::String);
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_undoable_actions() {
        assert!(Action::CancelChanges.is_undoable());
        assert!(Action::remove_field(SchemaKind::ContentType, "title").is_undoable());
        assert!(!Action::ReloadPlugin.is_undoable());
        assert!(!Action::open(EditingDocument::default()).is_undoable());
    }

    #[test]
    fn test_temporary_schema_from_data() {
        let mut data = SchemaData::new("Hero", "components_hero");
        data.icon = Some("star".to_string());
        let schema = data.to_temporary_schema("sections.hero", SchemaKind::Component);

        assert!(schema.is_temporary);
        assert!(schema.attributes.is_empty());
        assert_eq!(schema.icon.as_deref(), Some("star"));
        assert_eq!(schema.collection_name, "components_hero");
    }
}
