//! # CTB Store
//!
//! The schema editing state store.
//!
//! A `SessionState` holds the document being edited, its last loaded version,
//! and the component and content-type registries. Every change is an
//! `Action` applied by the pure transition function [`reduce`], which keeps
//! both sides of self-relations consistent and pulls referenced components
//! into the edited document.
//!
//! [`Store`] wraps the transition function for callers: it owns the current
//! snapshot, serialises dispatches and keeps an undo history.
//!

pub mod action;
pub mod config;
pub mod mirror;
pub mod reducer;
pub mod state;
pub mod store;

pub use action::{Action, NamedAttribute, SchemaData};
pub use config::StoreConfig;
pub use mirror::{AttributeEdit, MirrorChange, plan_attribute_edit};
pub use reducer::{add_components_to_state, reduce};
pub use state::SessionState;
pub use store::{History, Store};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
