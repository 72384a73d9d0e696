//! Relation and component helper functions
//!
//! Pure utilities used by the editing store to keep the schema graph
//! consistent:
//!
//! - **Mirror synthesis**: the reverse side of a two-sided self-relation
//! - **Component aggregation**: every component a set of attributes pulls in
//! - **De-duplication**: order-preserving unique lists
//! - **Back-reference cleanup**: clearing `targetField` hints after a removal

use crate::attribute::Attribute;
use crate::schema::{Attributes, Components};
use ctb_core::{AttributeType, RelationKind};
use std::collections::HashSet;
use std::hash::Hash;

// ============================================================================
// Mirror Attributes
// ============================================================================

/// Build the reverse attribute of a two-sided relation
///
/// `kind` is the classified kind of the source attribute; the mirror carries
/// the opposite cardinality, targets `target` and names `source_name` back.
pub fn mirror_attribute(
    kind: RelationKind,
    target: impl Into<String>,
    source_name: impl Into<String>,
    private: bool,
) -> Attribute {
    let mut mirror = Attribute::relation(kind.opposite(), target).with_target_attribute(source_name);
    mirror.private = private;
    mirror
}

// ============================================================================
// Component Aggregation
// ============================================================================

/// Collect the uids of every component referenced by `attributes`
///
/// Component attributes are followed into the referenced component's own
/// attributes (looked up in `all_components`); dynamic zones contribute their
/// direct entries. The result keeps first-seen order and contains no
/// duplicates. Reference cycles between components terminate.
pub fn retrieve_components_from_schema(
    attributes: &Attributes,
    all_components: &Components,
) -> Vec<String> {
    let mut found = Vec::new();
    let mut visited = HashSet::new();
    collect_components(attributes, all_components, &mut visited, &mut found);
    make_unique(found)
}

fn collect_components(
    attributes: &Attributes,
    all_components: &Components,
    visited: &mut HashSet<String>,
    found: &mut Vec<String>,
) {
    for attribute in attributes.values() {
        match attribute.attribute_type {
            AttributeType::Component => {
                let Some(uid) = attribute.component.as_deref() else {
                    continue;
                };
                found.push(uid.to_string());

                if !visited.insert(uid.to_string()) {
                    continue;
                }
                if let Some(nested) = all_components.get(uid) {
                    collect_components(&nested.attributes, all_components, visited, found);
                }
            }
            AttributeType::DynamicZone => {
                if let Some(uids) = &attribute.components {
                    found.extend(uids.iter().cloned());
                }
            }
            _ => {}
        }
    }
}

// ============================================================================
// Lists
// ============================================================================

/// Remove duplicates, keeping the first occurrence of each item
pub fn make_unique<T, I>(items: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

// ============================================================================
// Back-references
// ============================================================================

/// Clear every `targetField` that points at `removed`
///
/// Returns the names of the attributes that were touched.
pub fn clear_target_field_references(attributes: &mut Attributes, removed: &str) -> Vec<String> {
    let mut touched = Vec::new();
    for (name, attribute) in attributes.iter_mut() {
        if attribute.target_field.as_deref() == Some(removed) {
            attribute.target_field = None;
            touched.push(name.clone());
        }
    }
    touched
}

// ============================================================================
// Tests
// ============================================================================
