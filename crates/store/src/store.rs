//! State holder with undo/redo
//!
//! Snapshots are shared behind `Arc`, so readers keep a consistent view while
//! later dispatches replace the current state. Dispatch takes `&mut self`,
//! which serialises transitions.

use crate::action::Action;
use crate::config::StoreConfig;
use crate::reducer::reduce;
use crate::state::SessionState;
use ctb_core::BuilderResult;
use std::sync::Arc;

// ============================================================================
// History (Undo/Redo)
// ============================================================================

/// Bounded undo/redo stacks of state snapshots
#[derive(Debug, Clone)]
pub struct History {
    /// Past states (for undo)
    past: Vec<Arc<SessionState>>,
    /// Future states (for redo)
    future: Vec<Arc<SessionState>>,
    /// Maximum number of past states kept
    max_size: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_max_size(crate::config::DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    /// Create history with the default size
    pub fn new() -> Self {
        Self::default()
    }

    /// Create history with a custom max size
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            max_size,
        }
    }

    /// Record the state before an edit (clears redo stack)
    pub fn push(&mut self, snapshot: Arc<SessionState>) {
        self.future.clear();
        if self.max_size == 0 {
            return;
        }

        self.past.push(snapshot);
        if self.past.len() > self.max_size {
            self.past.remove(0);
        }
    }

    /// Undo: pop from past, push current to future
    pub fn undo(&mut self, current: Arc<SessionState>) -> Option<Arc<SessionState>> {
        let previous = self.past.pop()?;
        self.future.push(current);
        Some(previous)
    }

    /// Redo: pop from future, push current to past
    pub fn redo(&mut self, current: Arc<SessionState>) -> Option<Arc<SessionState>> {
        let next = self.future.pop()?;
        self.past.push(current);
        Some(next)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    /// Get undo stack size
    pub fn undo_count(&self) -> usize {
        self.past.len()
    }

    /// Get redo stack size
    pub fn redo_count(&self) -> usize {
        self.future.len()
    }
}

// ============================================================================
// Store
// ============================================================================

/// Owner of the current session state
#[derive(Debug, Clone)]
pub struct Store {
    state: Arc<SessionState>,
    history: History,
    config: StoreConfig,
    dispatched: usize,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl Store {
    /// Create a store holding the empty initial state
    pub fn new(config: StoreConfig) -> Self {
        Self {
            state: Arc::new(SessionState::default()),
            history: History::with_max_size(config.history_limit),
            config,
            dispatched: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Shared handle to the current state
    pub fn snapshot(&self) -> Arc<SessionState> {
        Arc::clone(&self.state)
    }

    /// Store configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Undo/redo stacks
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Number of successfully applied actions
    pub fn dispatch_count(&self) -> usize {
        self.dispatched
    }

    /// Apply an action
    ///
    /// On error the current state is left as it was.
    pub fn dispatch(&mut self, action: &Action) -> BuilderResult<Arc<SessionState>> {
        let next = match reduce(&self.state, action) {
            Ok(next) => Arc::new(next),
            Err(e) => {
                tracing::warn!(action = action.name(), error = %e, "Action rejected");
                return Err(e);
            }
        };

        let previous = std::mem::replace(&mut self.state, Arc::clone(&next));
        if action.is_undoable() {
            self.history.push(previous);
        } else {
            self.history.clear();
        }

        self.dispatched += 1;
        tracing::debug!(
            action = action.name(),
            count = self.dispatched,
            undo = self.history.undo_count(),
            "Dispatched action"
        );
        Ok(next)
    }

    /// Apply actions in order, stopping at the first failure
    pub fn dispatch_all<'a, I>(&mut self, actions: I) -> BuilderResult<Arc<SessionState>>
    where
        I: IntoIterator<Item = &'a Action>,
    {
        for action in actions {
            self.dispatch(action)?;
        }
        Ok(self.snapshot())
    }

    /// Step back one edit; returns false when there is nothing to undo
    pub fn undo(&mut self) -> bool {
        match self.history.undo(Arc::clone(&self.state)) {
            Some(previous) => {
                self.state = previous;
                tracing::debug!(undo = self.history.undo_count(), "Undo");
                true
            }
            None => false,
        }
    }

    /// Re-apply an undone edit; returns false when there is nothing to redo
    pub fn redo(&mut self) -> bool {
        match self.history.redo(Arc::clone(&self.state)) {
            Some(next) => {
                self.state = next;
                tracing::debug!(redo = self.history.redo_count(), "Redo");
                true
            }
            None => false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ctb_core::{AttributeType, SchemaKind};
    use ctb_schema::{Attribute, Components, ContentTypes, EditTarget, EditingDocument, Schema};
    use pretty_assertions::assert_eq;

    fn opened_store(config: StoreConfig) -> Store {
        let mut store = Store::new(config);
        store
            .dispatch_all(&[
                Action::load(Components::new(), ContentTypes::new()),
                Action::open(EditingDocument::for_content_type(
                    Schema::content_type("article", "Article"),
                    Components::new(),
                )),
            ])
            .unwrap();
        store
    }

    fn add(name: &str) -> Action {
        Action::add_attribute(
            EditTarget::ContentType,
            name,
            Attribute::new(AttributeType::String),
        )
    }

    fn attribute_names(store: &Store) -> Vec<String> {
        store
            .state()
            .modified_data
            .content_type
            .as_ref()
            .unwrap()
            .attributes
            .keys()
            .cloned()
            .collect()
    }

    #[test]
    fn test_history_push_and_limit() {
        let mut history = History::with_max_size(2);
        for _ in 0..3 {
            history.push(Arc::new(SessionState::default()));
        }
        assert_eq!(history.undo_count(), 2);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_history_disabled() {
        let mut history = History::with_max_size(0);
        history.push(Arc::new(SessionState::default()));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_dispatch_replaces_snapshot() {
        let mut store = opened_store(StoreConfig::default());
        let before = store.snapshot();

        store.dispatch(&add("title")).unwrap();

        assert_eq!(attribute_names(&store), vec!["title"]);
        assert!(before.modified_data.content_type.as_ref().unwrap().attributes.is_empty());
        assert_eq!(store.dispatch_count(), 3);
    }

    #[test]
    fn test_failed_dispatch_keeps_state() {
        let mut store = opened_store(StoreConfig::default());
        let before = store.snapshot();

        let err = store
            .dispatch(&Action::remove_field(SchemaKind::ContentType, "missing"))
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
        assert_eq!(store.dispatch_count(), 2);
    }

    #[test]
    fn test_undo_redo() {
        let mut store = opened_store(StoreConfig::default());
        store.dispatch(&add("title")).unwrap();
        store.dispatch(&add("body")).unwrap();

        assert!(store.undo());
        assert_eq!(attribute_names(&store), vec!["title"]);
        assert!(store.undo());
        assert!(attribute_names(&store).is_empty());
        assert!(!store.undo());

        assert!(store.redo());
        assert_eq!(attribute_names(&store), vec!["title"]);
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut store = opened_store(StoreConfig::default());
        store.dispatch(&add("title")).unwrap();
        store.undo();
        store.dispatch(&add("slug")).unwrap();

        assert!(!store.redo());
        assert_eq!(attribute_names(&store), vec!["slug"]);
    }

    #[test]
    fn test_opening_schema_clears_history() {
        let mut store = opened_store(StoreConfig::default());
        store.dispatch(&add("title")).unwrap();
        assert!(store.history().can_undo());

        store
            .dispatch(&Action::open(EditingDocument::for_content_type(
                Schema::content_type("page", "Page"),
                Components::new(),
            )))
            .unwrap();

        assert!(!store.history().can_undo());
        assert_eq!(store.state().edited_uid(), Some("page"));
    }

    #[test]
    fn test_history_limit_from_config() {
        let mut store = opened_store(StoreConfig::default().with_history_limit(1));
        store.dispatch(&add("a")).unwrap();
        store.dispatch(&add("b")).unwrap();

        assert!(store.undo());
        assert!(!store.undo());
        assert_eq!(attribute_names(&store), vec!["a"]);
    }
}
