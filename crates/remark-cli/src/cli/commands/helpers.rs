//! Shared helpers for CLI commands.

use anyhow::{Context, Result};
use std::env;

use crate::cli::SourceArgs;
use remark_core::command::read_journal;
use remark_core::snapshot::read_snapshot;
use remark_core::CommentStore;

/// Environment variables checked for the viewer identity, in priority order.
const VIEWER_VARS: &[&str] = &["REMARK_VIEWER", "REMARK_USER"];

/// Resolve the viewer identity.
///
/// Resolution order:
/// 1. Explicit override (`--viewer`)
/// 2. REMARK_VIEWER environment variable
/// 3. REMARK_USER environment variable
///
/// Returns `None` when no identity is set; output is then rendered for an
/// anonymous reader.
pub fn resolve_viewer(explicit: Option<&str>) -> Option<String> {
    resolve_viewer_from(explicit, |var| env::var(var).ok())
}

/// [`resolve_viewer`] with the environment supplied by `lookup`. Empty
/// values are skipped.
fn resolve_viewer_from<F>(explicit: Option<&str>, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(name) = explicit {
        return Some(name.to_string());
    }

    VIEWER_VARS
        .iter()
        .filter_map(|var| lookup(var))
        .find(|name| !name.is_empty())
}

/// Build a store from a snapshot file and replay the journal on top of it.
pub fn open_store(source: &SourceArgs) -> Result<CommentStore> {
    let snapshot = read_snapshot(&source.snapshot)
        .with_context(|| format!("Failed to load snapshot {}", source.snapshot.display()))?;

    let mut store = CommentStore::new();
    store.load_all(snapshot);

    if let Some(path) = &source.journal {
        let journal = read_journal(path)
            .with_context(|| format!("Failed to load journal {}", path.display()))?;
        let total = journal.len();
        let applied = journal
            .into_iter()
            .map(|envelope| store.apply(envelope))
            .filter(|changed| *changed)
            .count();
        tracing::info!(total, applied, "Replayed journal");
    }

    Ok(store)
}
