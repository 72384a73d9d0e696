//! # CTB CLI
//!
//! Command-line interface for the content-type builder store.
//!
//! This crate replays recorded action logs against a data snapshot without
//! a browser, which makes editing sessions reproducible for debugging and
//! regression tests.
//!
//! ## Commands
//!
//! - `replay` - Apply a JSON action log and print or save the final state
//! - `inspect` - Summarise the schemas in a data snapshot
//!

pub mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use ctb_store::StoreConfig;
use std::path::PathBuf;

// Re-export dependencies for use in main.rs
pub use ctb_core;
pub use ctb_schema;
pub use ctb_store;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Arguments
// ============================================================================

/// Content-type builder - replay and inspect schema editing sessions
#[derive(Parser, Debug)]
#[command(name = "content-type-builder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Maximum number of undo steps kept by the store
    #[arg(long, global = true, env = "CTB_HISTORY_LIMIT")]
    pub history_limit: Option<usize>,

    /// Store configuration file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply a recorded action log to a data snapshot
    Replay {
        /// Data snapshot with the component and content type registries
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Editing document to open before replaying
        #[arg(short, long)]
        document: Option<PathBuf>,

        /// JSON array of actions
        #[arg(short, long)]
        actions: PathBuf,

        /// Fail if the final edited document breaks relation pairing
        #[arg(long)]
        check: bool,

        /// Write the final state here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarise the schemas in a data snapshot
    Inspect {
        /// Data snapshot to read
        #[arg(short, long)]
        snapshot: PathBuf,
    },
}

// ============================================================================
// Entry Point
// ============================================================================

/// Resolve the store configuration: defaults, then file, then flag/env
pub fn store_config(cli: &Cli) -> anyhow::Result<StoreConfig> {
    let mut config = match &cli.config {
        Some(path) => StoreConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => StoreConfig::default(),
    };

    if let Some(limit) = cli.history_limit {
        config = config.with_history_limit(limit);
    }

    tracing::debug!(history_limit = config.history_limit, "Resolved store config");
    Ok(config)
}

/// Run the parsed command
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = store_config(&cli)?;

    match cli.command {
        Command::Replay {
            snapshot,
            document,
            actions,
            check,
            output,
        } => commands::replay(commands::ReplayArgs {
            snapshot,
            document,
            actions,
            check,
            output,
            config,
        }),
        Command::Inspect { snapshot } => commands::inspect(&snapshot),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_replay() {
        let cli = Cli::try_parse_from([
            "content-type-builder",
            "replay",
            "--snapshot",
            "data.json",
            "--actions",
            "log.json",
            "--check",
        ])
        .unwrap();

        match cli.command {
            Command::Replay {
                snapshot,
                document,
                check,
                ..
            } => {
                assert_eq!(snapshot, PathBuf::from("data.json"));
                assert!(document.is_none());
                assert!(check);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_store_config_layering() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, r#"{ "historyLimit": 7 }"#).unwrap();

        let mut cli = Cli::try_parse_from([
            "content-type-builder",
            "--config",
            path.to_str().unwrap(),
            "inspect",
            "--snapshot",
            "data.json",
        ])
        .unwrap();
        assert_eq!(store_config(&cli).unwrap().history_limit, 7);

        cli.history_limit = Some(3);
        assert_eq!(store_config(&cli).unwrap().history_limit, 3);
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
