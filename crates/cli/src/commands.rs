//! Command implementations

use anyhow::{Context, Result};
use colored::Colorize;
use ctb_core::Validatable;
use ctb_schema::{DataSnapshot, Schema, load_document, load_snapshot, read_json, write_json};
use ctb_store::{Action, SessionState, Store, StoreConfig};
use std::path::{Path, PathBuf};

// ============================================================================
// Replay
// ============================================================================

/// Inputs of the `replay` command
#[derive(Debug, Clone)]
pub struct ReplayArgs {
    pub snapshot: PathBuf,
    pub document: Option<PathBuf>,
    pub actions: PathBuf,
    pub check: bool,
    pub output: Option<PathBuf>,
    pub config: StoreConfig,
}

/// Load the snapshot, open the document and apply every logged action
pub fn replay_state(args: &ReplayArgs) -> Result<SessionState> {
    let snapshot = load_snapshot(&args.snapshot)
        .with_context(|| format!("Failed to load snapshot {}", args.snapshot.display()))?;
    let actions: Vec<Action> = read_json(&args.actions)
        .with_context(|| format!("Failed to load actions {}", args.actions.display()))?;

    let mut store = Store::new(args.config.clone());
    store.dispatch(&Action::GetDataSucceeded {
        components: snapshot.components,
        content_types: snapshot.content_types,
        reserved_names: snapshot.reserved_names,
    })?;

    if let Some(path) = &args.document {
        let document = load_document(path)
            .with_context(|| format!("Failed to load document {}", path.display()))?;
        store.dispatch(&Action::open(document))?;
    }

    for (index, action) in actions.iter().enumerate() {
        store
            .dispatch(action)
            .with_context(|| format!("Action #{} ({}) failed", index, action.name()))?;
    }

    tracing::info!(
        actions = actions.len(),
        dispatched = store.dispatch_count(),
        "Replay finished"
    );

    let state = store.state().clone();
    if args.check {
        state
            .validate()
            .context("Edited document is inconsistent after replay")?;
    }
    Ok(state)
}

/// Run `replay`
pub fn replay(args: ReplayArgs) -> Result<()> {
    let state = replay_state(&args)?;

    match &args.output {
        Some(path) => {
            write_json(path, &state)?;
            println!("{} {}", "Wrote".green().bold(), path.display());
            if state.has_unsaved_changes() {
                println!("   {}", "State has unsaved changes".yellow());
            }
            for note in state_notes(&state) {
                println!("   {}", note);
            }
        }
        None => println!("{}", serde_json::to_string_pretty(&state)?),
    }

    Ok(())
}

/// Unsaved schemas and known component categories of a replayed state
pub fn state_notes(state: &SessionState) -> Vec<String> {
    let mut notes = Vec::new();

    let temporary: Vec<&str> = state.temporary_schemas().map(|s| s.uid.as_str()).collect();
    if !temporary.is_empty() {
        notes.push(format!("Unsaved schemas: {}", temporary.join(", ")));
    }

    let categories = state.component_categories();
    if !categories.is_empty() {
        notes.push(format!("Component categories: {}", categories.join(", ")));
    }

    notes
}

// ============================================================================
// Inspect
// ============================================================================

/// Schema uid with its attribute and relation counts
pub fn summary_line(schema: &Schema) -> String {
    format!(
        "{} ({} attributes, {} relations)",
        schema.uid,
        schema.attributes.len(),
        schema.relation_count()
    )
}

/// One summary line per schema, content types first
pub fn summarize(snapshot: &DataSnapshot) -> Vec<String> {
    snapshot
        .content_types
        .values()
        .chain(snapshot.components.values())
        .map(summary_line)
        .collect()
}

/// Schema and attribute names that collide with reserved names
pub fn reserved_collisions(snapshot: &DataSnapshot) -> Vec<String> {
    let reserved = &snapshot.reserved_names;
    let mut collisions = Vec::new();

    for schema in snapshot.content_types.values().chain(snapshot.components.values()) {
        if reserved.is_reserved_model(&schema.name) {
            collisions.push(format!("{}: name '{}' is reserved", schema.uid, schema.name));
        }
        for name in schema.attributes.keys() {
            if reserved.is_reserved_attribute(name) {
                collisions.push(format!("{}.{}: attribute name is reserved", schema.uid, name));
            }
        }
    }

    collisions
}

/// Run `inspect`
pub fn inspect(path: &Path) -> Result<()> {
    let snapshot = load_snapshot(path)
        .with_context(|| format!("Failed to load snapshot {}", path.display()))?;

    println!("{}", "Content types".cyan().bold());
    for schema in snapshot.content_types.values() {
        print_schema(schema);
    }

    println!("{}", "Components".cyan().bold());
    for schema in snapshot.components.values() {
        print_schema(schema);
    }

    if !snapshot.reserved_names.models.is_empty() {
        println!(
            "{} {}",
            "Reserved models:".yellow(),
            snapshot.reserved_names.models.join(", ")
        );
    }

    for collision in reserved_collisions(&snapshot) {
        println!("  {}", collision.yellow());
    }

    Ok(())
}

fn print_schema(schema: &Schema) {
    match schema.validate() {
        Ok(()) => println!("  {}", summary_line(schema)),
        Err(e) => println!("  {}  {}", summary_line(schema), e.to_string().red()),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ctb_schema::{Attribute, RelationKind, save_snapshot};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn snapshot() -> DataSnapshot {
        let mut snapshot = DataSnapshot::default();
        snapshot.content_types.insert(
            "person".to_string(),
            Schema::content_type("person", "Person"),
        );
        snapshot
    }

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    fn args(dir: &Path, actions: &str) -> ReplayArgs {
        let snapshot_path = dir.join("data.json");
        save_snapshot(&snapshot_path, &snapshot()).unwrap();
        ReplayArgs {
            snapshot: snapshot_path,
            document: Some(write(
                dir,
                "doc.json",
                r#"{ "contentType": { "uid": "person", "name": "Person", "attributes": {} } }"#,
            )),
            actions: write(dir, "actions.json", actions),
            check: true,
            output: None,
            config: StoreConfig::default(),
        }
    }

    #[test]
    fn test_replay_self_relation() {
        let dir = tempdir().unwrap();
        let args = args(
            dir.path(),
            r#"[{
                "type": "ADD_ATTRIBUTE",
                "attributeToSet": {
                    "name": "friends",
                    "type": "relation",
                    "relation": "manyToMany",
                    "target": "person",
                    "targetAttribute": "friendsOf"
                },
                "forTarget": "contentType"
            }]"#,
        );

        let state = replay_state(&args).unwrap();
        let person = state.modified_data.content_type.unwrap();
        assert_eq!(person.attribute_names(), vec!["friends", "friendsOf"]);
    }

    #[test]
    fn test_replay_reports_failing_action() {
        let dir = tempdir().unwrap();
        let args = args(
            dir.path(),
            r#"[
                { "type": "CANCEL_CHANGES" },
                { "type": "REMOVE_FIELD", "mainDataKey": "contentType", "attributeToRemoveName": "ghost" }
            ]"#,
        );

        let err = replay_state(&args).unwrap_err();
        assert!(err.to_string().contains("Action #1 (REMOVE_FIELD)"));
    }

    #[test]
    fn test_replay_rejects_unknown_action() {
        let dir = tempdir().unwrap();
        let args = args(dir.path(), r#"[{ "type": "DELETE_EVERYTHING" }]"#);
        assert!(replay_state(&args).is_err());
    }

    #[test]
    fn test_replay_writes_output() {
        let dir = tempdir().unwrap();
        let mut args = args(dir.path(), r#"[{ "type": "CANCEL_CHANGES" }]"#);
        let output = dir.path().join("state.json");
        args.output = Some(output.clone());

        replay(args).unwrap();
        let state: SessionState = read_json(&output).unwrap();
        assert!(!state.is_loading);
        assert_eq!(state.edited_uid(), Some("person"));
    }

    #[test]
    fn test_state_notes() {
        let mut state = SessionState::default();
        state.content_types.insert(
            "draft".to_string(),
            Schema::content_type("draft", "Draft").temporary(),
        );
        state.components.insert(
            "sections.hero".to_string(),
            Schema::component("sections.hero", "sections", "Hero"),
        );

        assert_eq!(
            state_notes(&state),
            vec![
                "Unsaved schemas: draft".to_string(),
                "Component categories: sections".to_string(),
            ]
        );
        assert!(state_notes(&SessionState::default()).is_empty());
    }

    #[test]
    fn test_reserved_collisions() {
        let mut snapshot = snapshot();
        snapshot.reserved_names.models.push("admin".to_string());
        snapshot.reserved_names.attributes.push("id".to_string());
        snapshot.content_types.insert(
            "admin".to_string(),
            Schema::content_type("admin", "Admin")
                .with_attribute("ID", Attribute::new(ctb_schema::AttributeType::Integer))
                .with_attribute("email", Attribute::new(ctb_schema::AttributeType::Email)),
        );

        assert_eq!(
            reserved_collisions(&snapshot),
            vec![
                "admin: name 'Admin' is reserved".to_string(),
                "admin.ID: attribute name is reserved".to_string(),
            ]
        );
    }

    #[test]
    fn test_summarize() {
        let mut snapshot = snapshot();
        snapshot.content_types.insert(
            "article".to_string(),
            Schema::content_type("article", "Article").with_attribute(
                "author",
                Attribute::relation(RelationKind::ManyToOne, "person"),
            ),
        );

        assert_eq!(
            summarize(&snapshot),
            vec![
                "person (0 attributes, 0 relations)".to_string(),
                "article (1 attributes, 1 relations)".to_string(),
            ]
        );
    }
}
