//! The transition function
//!
//! [`reduce`] maps `(state, action)` to a new state. It never mutates its
//! input: every handler works on a copy, so a failed transition leaves the
//! caller's snapshot untouched.

use crate::action::{Action, NamedAttribute, SchemaData};
use crate::mirror::plan_attribute_edit;
use crate::state::SessionState;
use ctb_core::{BuilderError, BuilderResult, SchemaKind};
use ctb_schema::{
    Components, ContentTypes, EditTarget, EditingDocument, ReservedNames,
    clear_target_field_references, make_unique, mirror_attribute, retrieve_components_from_schema,
};

// ============================================================================
// Entry Point
// ============================================================================

/// Apply one action and return the resulting state
pub fn reduce(state: &SessionState, action: &Action) -> BuilderResult<SessionState> {
    let mut next = state.clone();

    match action {
        Action::GetDataSucceeded {
            components,
            content_types,
            reserved_names,
        } => load_data(&mut next, components, content_types, reserved_names),
        Action::SetModifiedData {
            schema_to_set,
            has_just_created_schema,
        } => set_modified_data(&mut next, schema_to_set, *has_just_created_schema),
        Action::CreateSchema { uid, data } => create_schema(&mut next, uid, data),
        Action::CreateComponentSchema {
            uid,
            data,
            component_category,
            should_add_component_to_data,
        } => create_component_schema(
            &mut next,
            uid,
            data,
            component_category,
            *should_add_component_to_data,
        ),
        Action::AddAttribute {
            attribute_to_set,
            for_target,
            should_add_component_to_data,
        } => add_attribute(
            &mut next,
            state,
            attribute_to_set,
            for_target,
            *should_add_component_to_data,
        )?,
        Action::EditAttribute {
            attribute_to_set,
            for_target,
            initial_attribute,
        } => edit_attribute(&mut next, attribute_to_set, for_target, initial_attribute)?,
        Action::RemoveField {
            main_data_key,
            attribute_to_remove_name,
        } => remove_field(&mut next, *main_data_key, attribute_to_remove_name)?,
        Action::RemoveFieldFromDisplayedComponent {
            component_uid,
            attribute_to_remove_name,
        } => remove_field_from_displayed_component(
            &mut next,
            component_uid,
            attribute_to_remove_name,
        )?,
        Action::AddCreatedComponentToDynamicZone {
            dynamic_zone_target,
            components_to_add,
        } => {
            dynamic_zone_mut(&mut next.modified_data, dynamic_zone_target)?
                .extend(components_to_add.iter().cloned());
        }
        Action::ChangeDynamicZoneComponents {
            dynamic_zone_target,
            new_components,
        } => change_dynamic_zone_components(&mut next, state, dynamic_zone_target, new_components)?,
        Action::RemoveComponentFromDynamicZone {
            dz_name,
            component_to_remove_index,
        } => {
            let list = dynamic_zone_mut(&mut next.modified_data, dz_name)?;
            if *component_to_remove_index >= list.len() {
                return Err(BuilderError::DynamicZoneIndexOutOfRange {
                    zone: dz_name.clone(),
                    index: *component_to_remove_index,
                    len: list.len(),
                });
            }
            list.remove(*component_to_remove_index);
        }
        Action::UpdateSchema {
            data,
            schema_type,
            uid,
        } => update_schema(&mut next, data, *schema_type, uid)?,
        Action::CancelChanges => {
            next.modified_data = next.initial_data.clone();
            next.components = next.initial_components.clone();
        }
        Action::DeleteNotSavedType => {
            next.content_types = next.initial_content_types.clone();
            next.components = next.initial_components.clone();
        }
        Action::ReloadPlugin => next = SessionState::default(),
    }

    tracing::debug!(action = action.name(), edited = ?next.edited_uid(), "Applied action");
    Ok(next)
}

// ============================================================================
// Loading
// ============================================================================

fn load_data(
    next: &mut SessionState,
    components: &Components,
    content_types: &ContentTypes,
    reserved_names: &ReservedNames,
) {
    next.components = components.clone();
    next.initial_components = components.clone();
    next.content_types = content_types.clone();
    next.initial_content_types = content_types.clone();
    next.reserved_names = reserved_names.clone();
    next.is_loading = false;
}

fn set_modified_data(next: &mut SessionState, document: &EditingDocument, just_created: bool) {
    next.is_loading_for_data_to_be_set = false;
    next.initial_data = document.clone();
    next.modified_data = document.clone();

    // Opening another schema discards unsaved registry edits.
    if !just_created {
        next.components = next.initial_components.clone();
        next.content_types = next.initial_content_types.clone();
    }
}

// ============================================================================
// Schema Creation
// ============================================================================

fn create_schema(next: &mut SessionState, uid: &str, data: &SchemaData) {
    let schema = data.to_temporary_schema(uid, SchemaKind::ContentType);
    next.content_types.insert(uid.to_string(), schema);
}

fn create_component_schema(
    next: &mut SessionState,
    uid: &str,
    data: &SchemaData,
    category: &str,
    add_to_document: bool,
) {
    let mut schema = data.to_temporary_schema(uid, SchemaKind::Component);
    schema.category = Some(category.to_string());

    if add_to_document {
        next.modified_data
            .components
            .insert(uid.to_string(), schema.clone());
    }
    next.components.insert(uid.to_string(), schema);
}

fn update_schema(
    next: &mut SessionState,
    data: &SchemaData,
    kind: SchemaKind,
    uid: &str,
) -> BuilderResult<()> {
    let schema = next.modified_data.main_mut(kind)?;
    schema.name = data.name.clone();
    schema.collection_name = data.collection_name.clone();

    match kind {
        SchemaKind::Component => {
            schema.category = data.category.clone();
            schema.icon = data.icon.clone();
            let updated = schema.clone();
            next.components.insert(uid.to_string(), updated);
        }
        SchemaKind::ContentType => {
            schema.content_type_kind = data.kind;
        }
    }

    Ok(())
}

// ============================================================================
// Attributes
// ============================================================================

fn add_attribute(
    next: &mut SessionState,
    state: &SessionState,
    named: &NamedAttribute,
    target: &EditTarget,
    add_component: bool,
) -> BuilderResult<()> {
    let NamedAttribute { name, attribute } = named;
    let schema = next.modified_data.resolve_mut(target)?;
    schema.attributes.insert(name.clone(), attribute.clone());

    if attribute.is_paired_self_relation(&schema.uid) {
        if let (Some(kind), Some(mirror_name)) =
            (attribute.relation_kind(), attribute.target_attribute.as_deref())
        {
            let mirror = mirror_attribute(kind, schema.uid.clone(), name.clone(), attribute.private);
            schema.attributes.insert(mirror_name.to_string(), mirror);
        }
    }

    if add_component {
        let uid = attribute
            .component
            .as_deref()
            .ok_or_else(|| BuilderError::MissingComponentReference(name.clone()))?;
        add_components_to_state(state, uid, &mut next.modified_data.components)?;
    }

    Ok(())
}

fn edit_attribute(
    next: &mut SessionState,
    named: &NamedAttribute,
    target: &EditTarget,
    initial: &NamedAttribute,
) -> BuilderResult<()> {
    let schema = next.modified_data.resolve_mut(target)?;
    schema.require_attribute(&initial.name)?;

    let edit = plan_attribute_edit(&schema.uid, &initial.attribute, &named.name, &named.attribute);
    tracing::trace!(attribute = %initial.name, mirror = ?edit.mirror, "Planned attribute edit");
    schema.attributes = edit.apply(&schema.attributes, &initial.name);

    Ok(())
}

fn remove_field(next: &mut SessionState, kind: SchemaKind, name: &str) -> BuilderResult<()> {
    let schema = next.modified_data.main_mut(kind)?;
    let removed = schema
        .attributes
        .shift_remove(name)
        .ok_or_else(|| BuilderError::attribute_not_found(&schema.uid, name))?;

    let mut removed_names = vec![name.to_string()];

    // Components only hold one-sided relations, so only content types pair with themselves.
    if kind.can_self_relate() && removed.is_paired_self_relation(&schema.uid) {
        if let Some(mirror) = removed.target_attribute.as_deref() {
            if schema.attributes.shift_remove(mirror).is_some() {
                removed_names.push(mirror.to_string());
            }
        }
    }

    for removed_name in &removed_names {
        clear_target_field_references(&mut schema.attributes, removed_name);
    }

    Ok(())
}

fn remove_field_from_displayed_component(
    next: &mut SessionState,
    component_uid: &str,
    name: &str,
) -> BuilderResult<()> {
    let target = EditTarget::NestedComponent(component_uid.to_string());
    let component = next.modified_data.resolve_mut(&target)?;
    component
        .attributes
        .shift_remove(name)
        .ok_or_else(|| BuilderError::attribute_not_found(component_uid, name))?;
    Ok(())
}

// ============================================================================
// Dynamic Zones
// ============================================================================

fn dynamic_zone_mut<'a>(
    document: &'a mut EditingDocument,
    zone: &str,
) -> BuilderResult<&'a mut Vec<String>> {
    let schema = document.main_mut(SchemaKind::ContentType)?;
    let attribute = schema.require_attribute_mut(zone)?;
    if !attribute.is_dynamic_zone() {
        return Err(BuilderError::NotADynamicZone(zone.to_string()));
    }
    Ok(attribute.components.get_or_insert_with(Vec::new))
}

fn change_dynamic_zone_components(
    next: &mut SessionState,
    state: &SessionState,
    zone: &str,
    new_components: &[String],
) -> BuilderResult<()> {
    let list = dynamic_zone_mut(&mut next.modified_data, zone)?;
    *list = make_unique(list.iter().chain(new_components).cloned());

    for uid in new_components {
        add_components_to_state(state, uid, &mut next.modified_data.components)?;
    }

    Ok(())
}

// ============================================================================
// Component Propagation
// ============================================================================

/// Copy a component and everything it nests into `target`
///
/// Components already in `target` and components created in this session
/// are skipped: both may carry edits that a registry copy would discard.
pub fn add_components_to_state(
    state: &SessionState,
    uid: &str,
    target: &mut Components,
) -> BuilderResult<()> {
    let component = state
        .components
        .get(uid)
        .ok_or_else(|| BuilderError::ComponentNotFound(uid.to_string()))?;

    if component.is_temporary || target.contains_key(uid) {
        return Ok(());
    }

    target.insert(uid.to_string(), component.clone());

    for nested_uid in retrieve_components_from_schema(&component.attributes, &state.components) {
        let Some(nested) = state.components.get(&nested_uid) else {
            tracing::warn!(component = uid, nested = %nested_uid, "Nested component is not registered");
            continue;
        };
        if nested.is_temporary || target.contains_key(&nested_uid) {
            continue;
        }
        target.insert(nested_uid, nested.clone());
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
