//! Relation mirroring for attribute edits
//!
//! Editing a relation attribute on a schema can create, rewrite or delete the
//! reverse attribute of a self-relation. The decision depends only on the
//! attribute before and after the edit, so it is planned up front and then
//! applied in a single ordered pass over the attribute map.

use ctb_core::types::{is_one_sided, is_two_sided};
use ctb_schema::{Attribute, Attributes, mirror_attribute};

// ============================================================================
// Plan
// ============================================================================

/// What happens to the reverse attribute of an edited relation
#[derive(Debug, Clone, PartialEq)]
pub enum MirrorChange {
    /// No other attribute is touched
    Unchanged,

    /// The old reverse attribute is deleted
    Remove { name: String },

    /// The old reverse attribute is rewritten where it stands
    Update {
        previous: String,
        name: String,
        mirror: Attribute,
    },

    /// A new reverse attribute is inserted right after the edited one
    Create { name: String, mirror: Attribute },
}

/// The planned outcome of one `EDIT_ATTRIBUTE`
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeEdit {
    /// New name of the edited attribute
    pub name: String,
    /// Value written for the edited attribute
    pub attribute: Attribute,
    /// Effect on the reverse attribute
    pub mirror: MirrorChange,
}

/// Decide how an attribute edit affects the schema `owner_uid`
///
/// Exactly one outcome applies:
///
/// 1. target moved away from the owner: remove the old mirror
/// 2. became one-sided while still targeting the owner: remove the old mirror
/// 3. stays two-sided on the owner: rewrite the old mirror in place
/// 4. one-sided to two-sided on the owner: create a mirror
/// 5. target moved onto the owner with a two-sided kind: create a mirror
///
/// When a mirror is rewritten or created, the edited attribute itself is
/// reduced to its relation fields.
pub fn plan_attribute_edit(
    owner_uid: &str,
    initial: &Attribute,
    name: &str,
    next: &Attribute,
) -> AttributeEdit {
    let is_editing_relation = initial.is_relation();
    let did_change_target = initial.target != next.target;
    let targets_owner = next.targets(owner_uid);
    let targeted_owner = initial.targets(owner_uid);
    let kind = next.relation_kind();
    let initial_kind = initial.relation_kind();
    let did_change_kind = kind != initial_kind;

    let remove_because_of_target =
        did_change_target && !targets_owner && targeted_owner && is_editing_relation;
    let remove_because_of_kind =
        did_change_kind && targeted_owner && is_one_sided(kind) && is_editing_relation;

    if remove_because_of_target || remove_because_of_kind {
        let mirror = match &initial.target_attribute {
            Some(previous) => MirrorChange::Remove {
                name: previous.clone(),
            },
            None => MirrorChange::Unchanged,
        };
        return AttributeEdit {
            name: name.to_string(),
            attribute: next.clone(),
            mirror,
        };
    }

    let stays_on_owner = targeted_owner && targets_owner && is_editing_relation;
    let update_because_of_kind = !is_one_sided(initial_kind) && is_two_sided(kind) && stays_on_owner;
    let create_because_of_kind = is_one_sided(initial_kind) && is_two_sided(kind) && stays_on_owner;
    let create_because_of_target = did_change_target && targets_owner && is_two_sided(kind);

    let Some(kind) = kind.filter(|_| {
        update_because_of_kind || create_because_of_kind || create_because_of_target
    }) else {
        return AttributeEdit {
            name: name.to_string(),
            attribute: next.clone(),
            mirror: MirrorChange::Unchanged,
        };
    };

    let attribute = next.relation_only();
    let mirror = match next.target_attribute.as_deref() {
        Some(mirror_name) => {
            let mirror = mirror_attribute(kind, owner_uid, name, next.private);
            if update_because_of_kind {
                match &initial.target_attribute {
                    Some(previous) => MirrorChange::Update {
                        previous: previous.clone(),
                        name: mirror_name.to_string(),
                        mirror,
                    },
                    None => MirrorChange::Unchanged,
                }
            } else {
                MirrorChange::Create {
                    name: mirror_name.to_string(),
                    mirror,
                }
            }
        }
        // A two-sided kind without a reverse name cannot keep a mirror.
        None => match (&initial.target_attribute, update_because_of_kind) {
            (Some(previous), true) => MirrorChange::Remove {
                name: previous.clone(),
            },
            _ => MirrorChange::Unchanged,
        },
    };

    AttributeEdit {
        name: name.to_string(),
        attribute,
        mirror,
    }
}

// ============================================================================
// Apply
// ============================================================================

impl AttributeEdit {
    /// Rebuild `attributes` with `initial_name` replaced by this edit
    ///
    /// Order is kept: the edited attribute stays where `initial_name` was, a
    /// rewritten mirror stays where the old mirror was, a created mirror
    /// follows the edited attribute and a removed mirror is skipped. The
    /// result is the same whichever side of a pair comes first.
    pub fn apply(&self, attributes: &Attributes, initial_name: &str) -> Attributes {
        let mut rebuilt = Attributes::with_capacity(attributes.len() + 1);

        for (current, attribute) in attributes {
            if current == initial_name {
                rebuilt.insert(self.name.clone(), self.attribute.clone());
                if let MirrorChange::Create { name, mirror } = &self.mirror {
                    rebuilt.insert(name.clone(), mirror.clone());
                }
                continue;
            }

            match &self.mirror {
                MirrorChange::Remove { name } if name == current => {}
                MirrorChange::Update {
                    previous,
                    name,
                    mirror,
                } if previous == current => {
                    rebuilt.insert(name.clone(), mirror.clone());
                }
                // Already written under its new name.
                _ if current == &self.name => {}
                _ => {
                    rebuilt.insert(current.clone(), attribute.clone());
                }
            }
        }

        rebuilt
    }
}

// ============================================================================
// Tests
// ============================================================================
